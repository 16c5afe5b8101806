use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use log::debug;

use crate::metrics_text::{self, Measurement};

/// The fixed set of values a [`PowerMetrics`] record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ConsumedEnergy,
    ProvidedEnergy,
    #[serde(rename = "current_power_usage")]
    CurrentPower,
    CurrentPowerL1,
    CurrentPowerL2,
    CurrentPowerL3,
    VoltageL1,
    VoltageL2,
    VoltageL3,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::ConsumedEnergy,
        Field::ProvidedEnergy,
        Field::CurrentPower,
        Field::CurrentPowerL1,
        Field::CurrentPowerL2,
        Field::CurrentPowerL3,
        Field::VoltageL1,
        Field::VoltageL2,
        Field::VoltageL3,
    ];

    /// Key used in the JSON output and the config file
    pub fn json_name(&self) -> &'static str {
        match self {
            Field::ConsumedEnergy => "consumed_energy",
            Field::ProvidedEnergy => "provided_energy",
            Field::CurrentPower => "current_power_usage",
            Field::CurrentPowerL1 => "current_power_l1",
            Field::CurrentPowerL2 => "current_power_l2",
            Field::CurrentPowerL3 => "current_power_l3",
            Field::VoltageL1 => "voltage_l1",
            Field::VoltageL2 => "voltage_l2",
            Field::VoltageL3 => "voltage_l3",
        }
    }

    /// Command line flag supplying the identifier for this field
    pub fn flag_name(&self) -> &'static str {
        match self {
            Field::ConsumedEnergy => "consumed-energy",
            Field::ProvidedEnergy => "provided-energy",
            Field::CurrentPower => "current-power",
            Field::CurrentPowerL1 => "current-powerL1",
            Field::CurrentPowerL2 => "current-powerL2",
            Field::CurrentPowerL3 => "current-powerL3",
            Field::VoltageL1 => "voltageL1",
            Field::VoltageL2 => "voltageL2",
            Field::VoltageL3 => "voltageL3",
        }
    }
}

/// Identifier to search for, per output field. Missing entries are never requested.
pub type FieldMap = BTreeMap<Field, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_energy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_energy: Option<f64>,
    #[serde(rename = "current_power_usage", skip_serializing_if = "Option::is_none")]
    pub current_power: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_power_l1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_power_l2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_power_l3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_l1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_l2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_l3: Option<f64>,
}

impl PowerMetrics {
    fn slot(&mut self, field: Field) -> &mut Option<f64> {
        match field {
            Field::ConsumedEnergy => &mut self.consumed_energy,
            Field::ProvidedEnergy => &mut self.provided_energy,
            Field::CurrentPower => &mut self.current_power,
            Field::CurrentPowerL1 => &mut self.current_power_l1,
            Field::CurrentPowerL2 => &mut self.current_power_l2,
            Field::CurrentPowerL3 => &mut self.current_power_l3,
            Field::VoltageL1 => &mut self.voltage_l1,
            Field::VoltageL2 => &mut self.voltage_l2,
            Field::VoltageL3 => &mut self.voltage_l3,
        }
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::ConsumedEnergy => self.consumed_energy,
            Field::ProvidedEnergy => self.provided_energy,
            Field::CurrentPower => self.current_power,
            Field::CurrentPowerL1 => self.current_power_l1,
            Field::CurrentPowerL2 => self.current_power_l2,
            Field::CurrentPowerL3 => self.current_power_l3,
            Field::VoltageL1 => self.voltage_l1,
            Field::VoltageL2 => self.voltage_l2,
            Field::VoltageL3 => self.voltage_l3,
        }
    }

    pub fn set(&mut self, field: Field, measurement: Measurement) {
        *self.slot(field) = measurement.value();
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Builds the output record by looking up every field's identifier in `payload`.
pub fn assemble(payload: &str, fields: &FieldMap) -> PowerMetrics {
    let mut metrics = PowerMetrics::default();

    for field in Field::ALL {
        let identifier = fields.get(&field).map(String::as_str).unwrap_or("");
        let measurement = metrics_text::extract(payload, identifier);
        if let Measurement::Found(value) = measurement {
            debug!("{} = {}", field.json_name(), value);
            metrics.set(field, measurement);
        }
    }

    metrics
}
