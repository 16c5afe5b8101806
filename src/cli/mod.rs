use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;
use crate::record::{Field, FieldMap};

/// Scrape the metrics page of a meter gateway and print selected values as JSON
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Cli {
    /// IP address (optionally with port) of the device
    #[arg(long)]
    pub ip: Option<String>,

    /// YAML file with the address and the field identifiers
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Current Power Serial
    #[arg(long = "current-power", value_name = "IDENTIFIER")]
    pub current_power: Option<String>,

    /// Current Power L1
    #[arg(long = "current-powerL1", value_name = "IDENTIFIER")]
    pub current_power_l1: Option<String>,

    /// Current Power L2
    #[arg(long = "current-powerL2", value_name = "IDENTIFIER")]
    pub current_power_l2: Option<String>,

    /// Current Power L3
    #[arg(long = "current-powerL3", value_name = "IDENTIFIER")]
    pub current_power_l3: Option<String>,

    /// Voltage L1
    #[arg(long = "voltageL1", value_name = "IDENTIFIER")]
    pub voltage_l1: Option<String>,

    /// Voltage L2
    #[arg(long = "voltageL2", value_name = "IDENTIFIER")]
    pub voltage_l2: Option<String>,

    /// Voltage L3
    #[arg(long = "voltageL3", value_name = "IDENTIFIER")]
    pub voltage_l3: Option<String>,

    /// Consumed Energy
    #[arg(long = "consumed-energy", value_name = "IDENTIFIER")]
    pub consumed_energy: Option<String>,

    /// Provided Energy
    #[arg(long = "provided-energy", value_name = "IDENTIFIER")]
    pub provided_energy: Option<String>,
}

impl Cli {
    pub fn identifier(&self, field: Field) -> Option<&String> {
        match field {
            Field::ConsumedEnergy => self.consumed_energy.as_ref(),
            Field::ProvidedEnergy => self.provided_energy.as_ref(),
            Field::CurrentPower => self.current_power.as_ref(),
            Field::CurrentPowerL1 => self.current_power_l1.as_ref(),
            Field::CurrentPowerL2 => self.current_power_l2.as_ref(),
            Field::CurrentPowerL3 => self.current_power_l3.as_ref(),
            Field::VoltageL1 => self.voltage_l1.as_ref(),
            Field::VoltageL2 => self.voltage_l2.as_ref(),
            Field::VoltageL3 => self.voltage_l3.as_ref(),
        }
    }

    /// Settings given on the command line only, without the config file
    pub fn settings(&self) -> Settings {
        let fields: FieldMap = Field::ALL
            .iter()
            .filter_map(|field| self.identifier(*field).map(|id| (*field, id.clone())))
            .collect();

        Settings { address: self.ip.clone(), fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_names_match_fields() {
        let command = Cli::command();
        for field in Field::ALL {
            let found = command.get_arguments().any(|arg| arg.get_long() == Some(field.flag_name()));
            assert!(found, "missing flag --{}", field.flag_name());
        }
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "metrics2json",
            "--ip", "192.168.1.40",
            "--current-powerL1", "power_l1",
            "--voltageL3", "72.7.0",
            "--consumed-energy", "",
        ]).unwrap();

        let settings = cli.settings();
        assert_eq!(settings.address.as_deref(), Some("192.168.1.40"));
        assert_eq!(settings.fields.len(), 3);
        assert_eq!(settings.fields[&Field::CurrentPowerL1], "power_l1");
        assert_eq!(settings.fields[&Field::VoltageL3], "72.7.0");
        assert_eq!(settings.fields[&Field::ConsumedEnergy], "");
    }

    #[test]
    fn test_address_is_optional_for_the_parser() {
        let cli = Cli::try_parse_from(["metrics2json"]).unwrap();
        assert_eq!(cli.ip, None);
        assert!(cli.settings().fields.is_empty());
    }
}
