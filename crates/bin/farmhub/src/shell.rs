//! Interactive menu shell over a [`Registry`].
//!
//! Reads one line per prompt from any [`BufRead`] and writes menus, results
//! and rejections to any [`Write`]. An unparseable entry aborts the current
//! menu iteration; end of input ends the session like the exit option.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use farmhub_app::registry::Registry;
use farmhub_domain::device::{DeviceOptions, DeviceType};
use farmhub_domain::id::{DeviceId, StationId};

const RULE: &str = "==================================================";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateStation,
    CreateDevice,
    DisplayState,
    ModifyDevice,
    Help,
    ToggleStatus,
    Exit,
}

/// Menu input that is not one of `1`–`7`.
#[derive(Debug, thiserror::Error)]
#[error("invalid menu choice {0:?}")]
pub struct InvalidChoice(String);

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::CreateStation),
            "2" => Ok(Self::CreateDevice),
            "3" => Ok(Self::DisplayState),
            "4" => Ok(Self::ModifyDevice),
            "5" => Ok(Self::Help),
            "6" => Ok(Self::ToggleStatus),
            "7" => Ok(Self::Exit),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

/// Why a menu action stopped before finishing.
#[derive(Debug, thiserror::Error)]
enum Interrupt {
    #[error("end of input")]
    Eof,
    #[error(transparent)]
    Io(#[from] io::Error),
}

type Step<T> = Result<T, Interrupt>;

/// Menu loop reading from `R` and writing to `W`.
pub struct Shell<R, W> {
    input: R,
    output: W,
    registry: Registry,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, registry: Registry) -> Self {
        Self {
            input,
            output,
            registry,
        }
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.iteration() {
                Ok(true) => {}
                Ok(false) | Err(Interrupt::Eof) => break,
                Err(Interrupt::Io(err)) => return Err(err),
            }
        }
        writeln!(self.output, "Goodbye, Farmer!")?;
        self.output.flush()
    }

    /// One pass through the menu. `Ok(false)` means the user chose to exit.
    fn iteration(&mut self) -> Step<bool> {
        self.print_menu()?;
        let line = self.prompt("Pick an option (1–7): ")?;
        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(err) => {
                tracing::debug!(error = %err, "menu choice rejected");
                writeln!(self.output, "Invalid choice. Please try again.")?;
                return Ok(true);
            }
        };
        match choice {
            MenuChoice::CreateStation => self.create_station()?,
            MenuChoice::CreateDevice => self.create_device()?,
            MenuChoice::DisplayState => self.display_state()?,
            MenuChoice::ModifyDevice => self.modify_device()?,
            MenuChoice::Help => write!(self.output, "\n{}", self.registry.show_help())?,
            MenuChoice::ToggleStatus => self.toggle_status()?,
            MenuChoice::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Welcome to Smart Farming System")?;
        writeln!(self.output, "1. Create a new station")?;
        writeln!(self.output, "2. Create a new device")?;
        writeln!(self.output, "3. Display system state")?;
        writeln!(self.output, "4. Modify device settings")?;
        writeln!(self.output, "5. Show help (device types)")?;
        writeln!(self.output, "6. Toggle device status ON/OFF")?;
        writeln!(self.output, "7. Exit")?;
        writeln!(self.output, "{RULE}")
    }

    fn create_station(&mut self) -> Step<()> {
        let Some(x) = self.read_number("Enter X coordinate: ")? else {
            return Ok(());
        };
        let Some(y) = self.read_number("Enter Y coordinate: ")? else {
            return Ok(());
        };
        let id = self.registry.create_station(x, y);
        if let Ok(station) = self.registry.station(id) {
            writeln!(
                self.output,
                "Station {id} created at {}.",
                station.coordinates()
            )?;
        }
        Ok(())
    }

    fn create_device(&mut self) -> Step<()> {
        let type_input =
            self.prompt("Enter device type (e.g., 'soil', 'weather', 'irrigation', 'crop'): ")?;
        let prompt = "Enter station ID to install this device at: ";
        let Some(location) = self.read_id::<StationId>(prompt)? else {
            return Ok(());
        };

        let mut options = DeviceOptions::default();
        match self.registry.resolve_device_type(&type_input) {
            Some(DeviceType::SoilMoistureSensor) => {
                let Some(threshold) = self.read_number("Enter moisture threshold (%): ")? else {
                    return Ok(());
                };
                options = options.threshold(threshold);
            }
            Some(DeviceType::IrrigationController) => {
                let Some(rate) = self.read_number("Enter water flow rate (liters/min): ")? else {
                    return Ok(());
                };
                options = options.water_flow_rate(rate);
            }
            Some(DeviceType::WeatherMonitor | DeviceType::CropHealthAnalyzer) | None => {}
        }

        match self.registry.create_device(&type_input, location, options) {
            Ok(id) => {
                let device_type = self.registry.device(id).map(|d| d.device_type());
                if let Ok(device_type) = device_type {
                    writeln!(
                        self.output,
                        "{device_type} with ID {id} added to Station {location}."
                    )?;
                }
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    fn display_state(&mut self) -> Step<()> {
        let report = self.registry.display_state();
        if report.is_empty() {
            writeln!(self.output, "No stations yet.")?;
        } else {
            write!(self.output, "\n{report}")?;
        }
        Ok(())
    }

    fn modify_device(&mut self) -> Step<()> {
        let Some(id) = self.read_id::<DeviceId>("Enter Device ID to modify: ")? else {
            return Ok(());
        };
        let device_type = match self.registry.device(id) {
            Ok(device) => device.device_type(),
            Err(err) => {
                writeln!(self.output, "Error: {err}")?;
                return Ok(());
            }
        };
        writeln!(self.output, "Editing Device ID {id} ({device_type})")?;

        let Ok(Some(setting)) = self.registry.editable_setting(id) else {
            writeln!(self.output, "This device has no editable settings.")?;
            return Ok(());
        };
        let Some(value) = self.read_number(&format!("Enter new {}: ", setting.label()))? else {
            return Ok(());
        };
        match self.registry.modify_device(id, value) {
            Ok(change) => writeln!(self.output, "{change}")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    fn toggle_status(&mut self) -> Step<()> {
        let Some(id) = self.read_id::<DeviceId>("Enter Device ID to toggle status: ")? else {
            return Ok(());
        };
        match self.registry.toggle_device_status(id) {
            Ok(status) => writeln!(self.output, "Device {id} is now {status}!")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(())
    }

    /// Prompt for a finite number. `None` after telling the user the entry
    /// was invalid.
    fn read_number(&mut self, prompt: &str) -> Step<Option<f64>> {
        let line = self.prompt(prompt)?;
        match line.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => {
                writeln!(self.output, "Invalid number {:?}.", line.trim())?;
                Ok(None)
            }
        }
    }

    fn read_id<T: FromStr>(&mut self, prompt: &str) -> Step<Option<T>> {
        let line = self.prompt(prompt)?;
        if let Ok(id) = line.parse() {
            Ok(Some(id))
        } else {
            writeln!(self.output, "Invalid ID {:?}.", line.trim())?;
            Ok(None)
        }
    }

    /// Write `text`, then read one line without its line ending.
    fn prompt(&mut self, text: &str) -> Step<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::Eof);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    #[cfg(test)]
    fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use farmhub_domain::device::DeviceStatus;

    use super::*;

    fn run(input: &str) -> (String, Registry) {
        let mut output = Vec::new();
        let mut shell = Shell::new(Cursor::new(input.to_string()), &mut output, Registry::new());
        shell.run().unwrap();
        let registry = std::mem::take(&mut shell.registry);
        drop(shell);
        (String::from_utf8(output).unwrap(), registry)
    }

    #[test]
    fn should_parse_every_menu_choice() {
        let choices: Vec<_> = (1..=7)
            .map(|n| n.to_string().parse::<MenuChoice>().unwrap())
            .collect();
        assert_eq!(choices[0], MenuChoice::CreateStation);
        assert_eq!(choices[6], MenuChoice::Exit);
        assert_eq!(" 3 ".parse::<MenuChoice>().unwrap(), MenuChoice::DisplayState);
    }

    #[test]
    fn should_reject_choice_outside_menu() {
        assert!("8".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn should_say_goodbye_on_exit() {
        let (output, _) = run("7\n");
        assert!(output.contains("Welcome to Smart Farming System"));
        assert!(output.contains("Pick an option (1–7): "));
        assert!(output.ends_with("Goodbye, Farmer!\n"));
    }

    #[test]
    fn should_end_session_when_input_ends() {
        let (output, _) = run("");
        assert!(output.ends_with("Goodbye, Farmer!\n"));
    }

    #[test]
    fn should_reloop_after_invalid_choice() {
        let (output, _) = run("9\n7\n");
        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches("Welcome to Smart Farming System").count(), 2);
    }

    #[test]
    fn should_create_station_from_prompts() {
        let (output, registry) = run("1\n3.5\n-2\n7\n");
        assert!(output.contains("Station 0 created at (3.5, -2.0)."));
        assert_eq!(registry.stations().count(), 1);
    }

    #[test]
    fn should_abort_station_creation_on_bad_coordinate() {
        let (output, registry) = run("1\nnorth\n7\n");
        assert!(output.contains("Invalid number \"north\"."));
        assert_eq!(registry.stations().count(), 0);
    }

    #[test]
    fn should_reject_non_finite_coordinates() {
        let (_, registry) = run("1\n1\ninf\n7\n");
        assert_eq!(registry.stations().count(), 0);
    }

    #[test]
    fn should_create_soil_sensor_with_prompted_threshold() {
        let (output, registry) = run("1\n0\n0\n2\nsoil\n0\n45\n7\n");
        assert!(output.contains("SoilMoistureSensor with ID 0 added to Station 0."));
        let threshold = registry
            .device(DeviceId::new(0))
            .unwrap()
            .as_soil_moisture()
            .unwrap()
            .threshold();
        assert!((threshold - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_prompt_flow_rate_for_resolved_irrigation_type() {
        let (output, registry) = run("1\n0\n0\n2\nIrrigationController\n0\n12\n7\n");
        assert!(output.contains("Enter water flow rate (liters/min): "));
        let rate = registry
            .device(DeviceId::new(0))
            .unwrap()
            .as_irrigation()
            .unwrap()
            .water_flow_rate();
        assert!((rate - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_not_create_device_with_out_of_range_threshold() {
        let (output, registry) = run("1\n0\n0\n2\nsoil\n0\n150\n7\n");
        assert!(output.contains("Error: invalid threshold 150"));
        assert_eq!(registry.devices().count(), 0);
    }

    #[test]
    fn should_report_missing_station_on_device_creation() {
        let (output, registry) = run("2\nweather\n4\n7\n");
        assert!(output.contains("Error: station 4 not found"));
        assert_eq!(registry.devices().count(), 0);
    }

    #[test]
    fn should_report_unknown_device_type() {
        let (output, _) = run("1\n0\n0\n2\ntractor\n0\n7\n");
        assert!(output.contains("Error: unknown device type \"tractor\""));
    }

    #[test]
    fn should_abort_on_unparseable_station_id() {
        let (output, registry) = run("1\n0\n0\n2\nweather\nzero\n7\n");
        assert!(output.contains("Invalid ID \"zero\"."));
        assert_eq!(registry.devices().count(), 0);
    }

    #[test]
    fn should_modify_threshold_through_prompt() {
        let (output, registry) = run("1\n0\n0\n2\nsoil\n0\n30\n4\n0\n55\n7\n");
        assert!(output.contains("Editing Device ID 0 (SoilMoistureSensor)"));
        assert!(output.contains("Enter new moisture threshold (0–100): "));
        assert!(output.contains("Threshold updated to 55%"));
        let threshold = registry
            .device(DeviceId::new(0))
            .unwrap()
            .as_soil_moisture()
            .unwrap()
            .threshold();
        assert!((threshold - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_say_analyzer_has_no_editable_settings() {
        let (output, _) = run("1\n0\n0\n2\ncrop\n0\n4\n0\n7\n");
        assert!(output.contains("This device has no editable settings."));
    }

    #[test]
    fn should_report_unknown_device_on_modify() {
        let (output, _) = run("4\n3\n7\n");
        assert!(output.contains("Error: device 3 not found"));
    }

    #[test]
    fn should_toggle_status_by_id() {
        let (output, registry) = run("1\n0\n0\n2\nweather\n0\n6\n0\n7\n");
        assert!(output.contains("Device 0 is now ON!"));
        assert_eq!(
            registry.device(DeviceId::new(0)).unwrap().status(),
            DeviceStatus::On
        );
    }

    #[test]
    fn should_display_state_and_help() {
        let (output, _) = run("1\n1\n2\n2\nirrigation\n0\n10\n3\n5\n7\n");
        assert!(output.contains("Station 0: Coordinates (1.0, 2.0)"));
        assert!(output.contains(
            "    - Device ID: 0, Type: IrrigationController, Status: OFF, Flow Rate: 10 L/min"
        ));
        assert!(output.contains("Available Device Types:"));
    }

    #[test]
    fn should_say_when_there_are_no_stations() {
        let (output, _) = run("3\n7\n");
        assert!(output.contains("No stations yet."));
    }

    #[test]
    fn should_keep_registry_after_session() {
        let mut output = Vec::new();
        let mut shell = Shell::new(Cursor::new("1\n0\n0\n"), &mut output, Registry::new());
        shell.run().unwrap();
        assert_eq!(shell.registry().stations().count(), 1);
    }
}
