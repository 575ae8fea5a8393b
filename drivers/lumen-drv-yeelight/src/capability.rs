// A Yeelight bulb advertises the commands it accepts in the
// "support" field of its discovery record, as a space-separated
// list of method names:
//
//   support: get_prop set_default set_power toggle set_bright
//            start_cf stop_cf set_scene cron_add cron_get cron_del
//            set_ct_abx set_rgb set_hsv set_adjust set_music set_name
//
// The list is parsed once, when the device is built, and only used
// to decide which properties the device exposes.

use lumen_api::{Error, Result};
use std::{collections::BTreeSet, fmt, str::FromStr};
use tracing::debug;

/// The command tokens documented for the Yeelight LAN protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Command {
    GetProp,
    SetDefault,
    SetPower,
    Toggle,
    SetBright,
    SetCtAbx,
    SetRgb,
    SetHsv,
    StartCf,
    StopCf,
    SetScene,
    CronAdd,
    CronGet,
    CronDel,
    SetAdjust,
    SetMusic,
    SetName,
    AdjustBright,
    AdjustCt,
    AdjustColor,
    BgSetPower,
    BgToggle,
    BgSetBright,
    BgSetCtAbx,
    BgSetRgb,
    BgSetHsv,
    BgStartCf,
    BgStopCf,
    BgSetScene,
    BgSetDefault,
    BgSetAdjust,
    BgAdjustBright,
    BgAdjustCt,
    BgAdjustColor,
    DevToggle,
}

const TOKENS: &[(&str, Command)] = &[
    ("get_prop", Command::GetProp),
    ("set_default", Command::SetDefault),
    ("set_power", Command::SetPower),
    ("toggle", Command::Toggle),
    ("set_bright", Command::SetBright),
    ("set_ct_abx", Command::SetCtAbx),
    ("set_rgb", Command::SetRgb),
    ("set_hsv", Command::SetHsv),
    ("start_cf", Command::StartCf),
    ("stop_cf", Command::StopCf),
    ("set_scene", Command::SetScene),
    ("cron_add", Command::CronAdd),
    ("cron_get", Command::CronGet),
    ("cron_del", Command::CronDel),
    ("set_adjust", Command::SetAdjust),
    ("set_music", Command::SetMusic),
    ("set_name", Command::SetName),
    ("adjust_bright", Command::AdjustBright),
    ("adjust_ct", Command::AdjustCt),
    ("adjust_color", Command::AdjustColor),
    ("bg_set_power", Command::BgSetPower),
    ("bg_toggle", Command::BgToggle),
    ("bg_set_bright", Command::BgSetBright),
    ("bg_set_ct_abx", Command::BgSetCtAbx),
    ("bg_set_rgb", Command::BgSetRgb),
    ("bg_set_hsv", Command::BgSetHsv),
    ("bg_start_cf", Command::BgStartCf),
    ("bg_stop_cf", Command::BgStopCf),
    ("bg_set_scene", Command::BgSetScene),
    ("bg_set_default", Command::BgSetDefault),
    ("bg_set_adjust", Command::BgSetAdjust),
    ("bg_adjust_bright", Command::BgAdjustBright),
    ("bg_adjust_ct", Command::BgAdjustCt),
    ("bg_adjust_color", Command::BgAdjustColor),
    ("dev_toggle", Command::DevToggle),
];

impl Command {
    /// Returns the token the bulb uses for this command.
    pub fn as_str(&self) -> &'static str {
        TOKENS
            .iter()
            .find_map(|(tok, cmd)| if cmd == self { Some(*tok) } else { None })
            .unwrap_or("")
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TOKENS
            .iter()
            .find_map(|(tok, cmd)| if *tok == s { Some(*cmd) } else { None })
            .ok_or_else(|| Error::ParseError(format!("unknown command '{}'", s)))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of commands a bulb accepts. It never changes after the
/// device is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Command>);

impl CapabilitySet {
    /// Parses a discovery record's "support" field. Tokens this
    /// driver doesn't know about are skipped; newer firmware adds
    /// commands and they don't affect the properties we expose.
    pub fn parse(support: &str) -> Self {
        CapabilitySet(
            support
                .split_whitespace()
                .filter_map(|tok| match tok.parse::<Command>() {
                    Ok(cmd) => Some(cmd),
                    Err(_) => {
                        debug!("ignoring unknown command '{}'", tok);
                        None
                    }
                })
                .collect(),
        )
    }

    pub fn contains(&self, cmd: Command) -> bool {
        self.0.contains(&cmd)
    }

    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        self.0.iter().copied()
    }

    pub fn is_dimmable(&self) -> bool {
        self.contains(Command::SetBright)
    }

    pub fn is_full_color(&self) -> bool {
        self.contains(Command::SetRgb) && self.contains(Command::SetHsv)
    }

    /// A bulb is treated as having variable color temperature only
    /// when the host accepts that property (`gate`) and the bulb
    /// isn't full-color. Full-color bulbs expose `color` instead.
    pub fn is_variable_color_temp(&self, gate: bool) -> bool {
        gate && self.contains(Command::SetCtAbx) && !self.is_full_color()
    }
}

impl FromIterator<Command> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        CapabilitySet(iter.into_iter().collect())
    }
}
