// Builds the host-facing model of a bulb: which properties it has
// and what category of light it is. Both depend only on the bulb's
// advertised commands and the host's color-temperature gate, so
// they're computed once.

use super::{capability::CapabilitySet, state::RemoteState};
use lumen_api::device::{
    DeviceCategory, PropertyDescriptor, Value, ValueType,
};

/// The properties a bulb can expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Color,
    ColorTemperature,
    Level,
    On,
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn descriptor(&self) -> PropertyDescriptor {
        match self {
            PropertyKind::Color => PropertyDescriptor {
                name: "color",
                semantic: "ColorProperty",
                label: "Color",
                kind: ValueType::String,
                unit: None,
                minimum: None,
                maximum: None,
            },
            PropertyKind::ColorTemperature => PropertyDescriptor {
                name: "colorTemperature",
                semantic: "ColorTemperatureProperty",
                label: "Color Temperature",
                kind: ValueType::Number,
                unit: Some("kelvin"),
                minimum: Some(1700),
                maximum: Some(6500),
            },
            PropertyKind::Level => PropertyDescriptor {
                name: "level",
                semantic: "BrightnessProperty",
                label: "Brightness",
                kind: ValueType::Number,
                unit: Some("percent"),
                minimum: Some(0),
                maximum: Some(100),
            },
            PropertyKind::On => PropertyDescriptor {
                name: "on",
                semantic: "OnOffProperty",
                label: "On/Off",
                kind: ValueType::Boolean,
                unit: None,
                minimum: None,
                maximum: None,
            },
        }
    }

    /// Computes this property's value from a state snapshot.
    pub fn extract(&self, state: &RemoteState) -> Value {
        match self {
            PropertyKind::Color => Value::Color(state.rgb()),
            PropertyKind::ColorTemperature => {
                Value::Int(state.color_temperature())
            }
            PropertyKind::Level => Value::Int(state.brightness()),
            PropertyKind::On => Value::Bool(state.is_on()),
        }
    }

    fn is_color_family(&self) -> bool {
        matches!(self, PropertyKind::Color | PropertyKind::ColorTemperature)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    pub properties: Vec<PropertyKind>,
    pub category: DeviceCategory,
}

impl Model {
    /// Derives the property set and category. `ct_gate` is set when
    /// the host understands the `colorTemperature` property.
    pub fn synthesize(caps: &CapabilitySet, ct_gate: bool) -> Self {
        let mut properties = Vec::with_capacity(3);

        // Only one color-family property is ever created; full color
        // takes precedence.

        if caps.is_full_color() {
            properties.push(PropertyKind::Color)
        } else if caps.is_variable_color_temp(ct_gate) {
            properties.push(PropertyKind::ColorTemperature)
        }

        if caps.is_dimmable() {
            properties.push(PropertyKind::Level)
        }

        properties.push(PropertyKind::On);

        let category = DeviceCategory::from_features(
            properties.iter().any(PropertyKind::is_color_family),
            properties.contains(&PropertyKind::Level),
        );

        Model {
            properties,
            category,
        }
    }

    /// The capability list the host uses to pick UI controls.
    pub fn capabilities(&self) -> Vec<&'static str> {
        let mut caps = vec!["OnOffSwitch", "Light"];

        if self.properties.iter().any(PropertyKind::is_color_family) {
            caps.push("ColorControl")
        }
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn names(model: &Model) -> Vec<&'static str> {
        model.properties.iter().map(PropertyKind::name).collect()
    }

    #[test]
    fn test_descriptors() {
        let d = PropertyKind::ColorTemperature.descriptor();

        assert_eq!(d.name, "colorTemperature");
        assert_eq!(d.kind, ValueType::Number);
        assert_eq!(d.unit, Some("kelvin"));
        assert_eq!(d.range(), Some((1700, 6500)));

        let d = PropertyKind::Level.descriptor();

        assert_eq!(d.unit, Some("percent"));
        assert_eq!(d.range(), Some((0, 100)));

        let d = PropertyKind::Color.descriptor();

        assert_eq!(d.kind, ValueType::String);
        assert_eq!(d.unit, None);
        assert_eq!(d.range(), None);

        assert_eq!(PropertyKind::On.descriptor().kind, ValueType::Boolean);
    }

    #[test]
    fn test_synthesis_table() {
        // Each row: support string, gate, expected names, category.

        const ROWS: &[(&str, bool, &[&str], DeviceCategory)] = &[
            ("set_power", true, &["on"], DeviceCategory::OnOffLight),
            (
                "set_power set_bright",
                true,
                &["level", "on"],
                DeviceCategory::DimmableLight,
            ),
            (
                "set_rgb set_hsv",
                true,
                &["color", "on"],
                DeviceCategory::OnOffColorLight,
            ),
            (
                "set_rgb set_hsv set_bright",
                false,
                &["color", "level", "on"],
                DeviceCategory::DimmableColorLight,
            ),
            (
                "set_ct_abx set_bright",
                true,
                &["colorTemperature", "level", "on"],
                DeviceCategory::DimmableColorLight,
            ),
            (
                "set_ct_abx set_bright",
                false,
                &["level", "on"],
                DeviceCategory::DimmableLight,
            ),
            (
                "set_ct_abx",
                true,
                &["colorTemperature", "on"],
                DeviceCategory::OnOffColorLight,
            ),
            (
                "set_ct_abx set_rgb set_hsv set_bright",
                true,
                &["color", "level", "on"],
                DeviceCategory::DimmableColorLight,
            ),
            ("set_rgb set_ct_abx", false, &["on"], DeviceCategory::OnOffLight),
        ];

        for (support, gate, expected, category) in ROWS {
            let model = Model::synthesize(&CapabilitySet::parse(support), *gate);

            assert_eq!(names(&model), *expected, "support: {}", support);
            assert_eq!(model.category, *category, "support: {}", support);
        }
    }

    #[test]
    fn test_synthesis_is_order_independent() {
        let a = CapabilitySet::parse("set_bright set_hsv set_ct_abx set_rgb");
        let b = CapabilitySet::parse("set_rgb set_ct_abx set_hsv set_bright");

        assert_eq!(Model::synthesize(&a, true), Model::synthesize(&b, true));
        assert_eq!(Model::synthesize(&a, true), Model::synthesize(&a, true));
    }

    #[test]
    fn test_capabilities() {
        let mono = Model::synthesize(&CapabilitySet::parse("set_bright"), true);
        let color =
            Model::synthesize(&CapabilitySet::parse("set_rgb set_hsv"), true);

        assert_eq!(mono.capabilities(), vec!["OnOffSwitch", "Light"]);
        assert_eq!(
            color.capabilities(),
            vec!["OnOffSwitch", "Light", "ColorControl"]
        );
    }

    #[test]
    fn test_extract() {
        let props: HashMap<String, String> = [
            ("power", "off"),
            ("color_mode", "1"),
            ("rgb", "255"),
            ("bright", "10"),
            ("ct", "6500"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let st = RemoteState::from_props(&props);

        assert_eq!(
            PropertyKind::Color.extract(&st).to_string(),
            "#0000FF"
        );
        assert_eq!(PropertyKind::Level.extract(&st), Value::Int(10));
        assert_eq!(
            PropertyKind::ColorTemperature.extract(&st),
            Value::Int(6500)
        );
        assert_eq!(PropertyKind::On.extract(&st), Value::Bool(false));
    }

    #[test]
    fn test_values_match_declared_types() {
        let st = RemoteState::default();

        for kind in [
            PropertyKind::Color,
            PropertyKind::ColorTemperature,
            PropertyKind::Level,
            PropertyKind::On,
        ] {
            assert_eq!(
                kind.extract(&st).value_type(),
                kind.descriptor().kind,
                "property: {}",
                kind.name()
            );
        }
    }
}
