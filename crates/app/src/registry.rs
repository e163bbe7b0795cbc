//! Registry: the single owner of every station and device.
//!
//! Devices live in one flat index keyed by [`DeviceId`]; each [`Station`]
//! lists the ids installed at it. Both are only ever written here, so the
//! two views stay consistent. Every operation validates fully before
//! mutating, and ids are never reused.

mod device_ops;

use std::collections::BTreeMap;

use farmhub_domain::device::{
    Device, DeviceDefaults, DeviceOptions, DeviceStatus, DeviceType, EditableSetting,
    SettingChange,
};
use farmhub_domain::error::{FarmError, NotFoundError, ValidationError};
use farmhub_domain::id::{DeviceId, StationId};
use farmhub_domain::station::Station;

use crate::report::{Help, StateReport};

/// In-memory registry of stations and devices.
#[derive(Debug, Default)]
pub struct Registry {
    stations: BTreeMap<StationId, Station>,
    devices: BTreeMap<DeviceId, Device>,
    station_counter: u32,
    device_counter: u32,
    defaults: DeviceDefaults,
}

impl Registry {
    /// Create an empty registry using the stock device defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that fills unset creation options from
    /// `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: DeviceDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn defaults(&self) -> &DeviceDefaults {
        &self.defaults
    }

    /// Map free-text input to a device type. See [`DeviceType::resolve`].
    #[must_use]
    pub fn resolve_device_type(&self, input: &str) -> Option<DeviceType> {
        DeviceType::resolve(input)
    }

    /// Register a new station at `(x, y)` and return its id.
    #[tracing::instrument(skip(self))]
    pub fn create_station(&mut self, x: f64, y: f64) -> StationId {
        let id = StationId::new(self.station_counter);
        self.stations.insert(id, Station::new(id, x, y));
        self.station_counter += 1;
        tracing::info!(station_id = %id, "station created");
        id
    }

    /// Install a device of the type named by `type_input` at `location`.
    ///
    /// # Errors
    ///
    /// Returns, in order of checking, [`FarmError::NotFound`] when `location`
    /// is not a known station, [`ValidationError::UnknownDeviceType`] when
    /// the type does not resolve, or a [`ValidationError`] for an invalid
    /// option. Nothing is mutated on error.
    #[tracing::instrument(skip(self, options))]
    pub fn create_device(
        &mut self,
        type_input: &str,
        location: StationId,
        options: DeviceOptions,
    ) -> Result<DeviceId, FarmError> {
        if !self.stations.contains_key(&location) {
            tracing::warn!(station_id = %location, "device rejected: unknown station");
            return Err(station_not_found(location).into());
        }
        let Some(device_type) = self.resolve_device_type(type_input) else {
            tracing::warn!("device rejected: unknown device type");
            return Err(ValidationError::UnknownDeviceType(type_input.trim().to_string()).into());
        };
        let config = options.into_config(device_type, &self.defaults)?;
        let id = DeviceId::new(self.device_counter);
        let device = Device::new(id, location, config)?;

        let station = self
            .stations
            .get_mut(&location)
            .ok_or_else(|| station_not_found(location))?;
        station.add_device(id);
        self.devices.insert(id, device);
        self.device_counter += 1;
        tracing::info!(device_id = %id, %device_type, station_id = %location, "device created");
        Ok(id)
    }

    /// The setting [`modify_device`](Self::modify_device) would change on
    /// this device, or `None` when it has nothing editable.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device.
    pub fn editable_setting(
        &self,
        device_id: DeviceId,
    ) -> Result<Option<EditableSetting>, FarmError> {
        Ok(self.device(device_id)?.editable_setting())
    }

    /// Set the device's editable setting to `value`: the moisture threshold
    /// for soil sensors, the flow rate for irrigation controllers.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device, a
    /// [`ValidationError`] for an out-of-range value, or
    /// [`DeviceError::NoEditableSettings`](farmhub_domain::error::DeviceError::NoEditableSettings)
    /// for other variants. The previous value is kept on error.
    #[tracing::instrument(skip(self))]
    pub fn modify_device(
        &mut self,
        device_id: DeviceId,
        value: f64,
    ) -> Result<SettingChange, FarmError> {
        self.device_mut(device_id)?
            .apply_setting(value)
            .inspect(|change| {
                tracing::info!(setting = ?change.setting, previous = change.previous, "device setting updated");
            })
            .inspect_err(|err| tracing::warn!(error = %err, "device edit rejected"))
    }

    /// Flip a device between ON and OFF, returning the new status.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device.
    #[tracing::instrument(skip(self))]
    pub fn toggle_device_status(&mut self, device_id: DeviceId) -> Result<DeviceStatus, FarmError> {
        let status = self.device_mut(device_id)?.toggle_status();
        tracing::info!(%status, "device toggled");
        Ok(status)
    }

    /// Snapshot of every station (by id) and its devices (by installation
    /// order).
    #[must_use]
    pub fn display_state(&self) -> StateReport {
        StateReport::build(self)
    }

    /// Static list of device types and their shorthand names.
    #[must_use]
    pub fn show_help(&self) -> Help {
        Help
    }

    /// Look up a station by id.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] when no station has `id`.
    pub fn station(&self, id: StationId) -> Result<&Station, FarmError> {
        self.stations
            .get(&id)
            .ok_or_else(|| station_not_found(id).into())
    }

    /// All stations in id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] when no device has `id`.
    pub fn device(&self, id: DeviceId) -> Result<&Device, FarmError> {
        self.devices
            .get(&id)
            .ok_or_else(|| device_not_found(id).into())
    }

    /// All devices in id order, across every station.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Devices installed at a station, in installation order.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] when no station has `id`.
    pub fn station_devices(
        &self,
        id: StationId,
    ) -> Result<impl Iterator<Item = &Device>, FarmError> {
        let station = self.station(id)?;
        Ok(station
            .devices()
            .iter()
            .filter_map(|device_id| self.devices.get(device_id)))
    }

    fn device_mut(&mut self, id: DeviceId) -> Result<&mut Device, FarmError> {
        self.devices
            .get_mut(&id)
            .ok_or_else(|| device_not_found(id).into())
    }

    fn station_mut(&mut self, id: StationId) -> Result<&mut Station, FarmError> {
        self.stations
            .get_mut(&id)
            .ok_or_else(|| station_not_found(id).into())
    }
}

fn station_not_found(id: StationId) -> NotFoundError {
    NotFoundError {
        entity: "station",
        id: id.to_string(),
    }
}

fn device_not_found(id: DeviceId) -> NotFoundError {
    NotFoundError {
        entity: "device",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmhub_domain::error::DeviceError;

    fn registry_with_station() -> (Registry, StationId) {
        let mut registry = Registry::new();
        let station = registry.create_station(1.0, 2.0);
        (registry, station)
    }

    #[test]
    fn should_create_station_with_exact_coordinates_and_no_devices() {
        let mut registry = Registry::new();
        let id = registry.create_station(12.5, -3.0);

        let station = registry.station(id).unwrap();
        assert!((station.coordinates().x - 12.5).abs() < f64::EPSILON);
        assert!((station.coordinates().y + 3.0).abs() < f64::EPSILON);
        assert!(station.devices().is_empty());
    }

    #[test]
    fn should_allocate_sequential_station_ids() {
        let mut registry = Registry::new();
        let first = registry.create_station(0.0, 0.0);
        let second = registry.create_station(0.0, 0.0);
        assert_eq!((first.value(), second.value()), (0, 1));
    }

    #[test]
    fn should_index_device_in_registry_and_station() {
        let (mut registry, station) = registry_with_station();
        let id = registry
            .create_device("soil", station, DeviceOptions::default())
            .unwrap();

        assert_eq!(registry.device(id).unwrap().location(), station);
        assert_eq!(registry.station(station).unwrap().devices(), [id]);
    }

    #[test]
    fn should_apply_defaults_when_options_missing() {
        let (mut registry, station) = registry_with_station();
        let soil = registry
            .create_device("soil", station, DeviceOptions::default())
            .unwrap();
        let pump = registry
            .create_device("irrigation", station, DeviceOptions::default())
            .unwrap();

        let threshold = registry.device(soil).unwrap().as_soil_moisture().unwrap().threshold();
        let rate = registry
            .device(pump)
            .unwrap()
            .as_irrigation()
            .unwrap()
            .water_flow_rate();
        assert!((threshold - 30.0).abs() < f64::EPSILON);
        assert!((rate - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_use_configured_defaults() {
        let mut registry = Registry::with_defaults(DeviceDefaults {
            soil_threshold: 45.0,
            water_flow_rate: 2.0,
        });
        let station = registry.create_station(0.0, 0.0);
        let soil = registry
            .create_device("soil", station, DeviceOptions::default())
            .unwrap();
        let threshold = registry.device(soil).unwrap().as_soil_moisture().unwrap().threshold();
        assert!((threshold - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_device_for_unknown_station_without_mutation() {
        let (mut registry, _) = registry_with_station();
        let result = registry.create_device("soil", StationId::new(9), DeviceOptions::default());

        assert!(matches!(result, Err(FarmError::NotFound(_))));
        assert_eq!(registry.devices().count(), 0);
        assert_eq!(registry.stations().count(), 1);
        assert_eq!(registry.device_counter, 0);
        assert_eq!(registry.station_counter, 1);
    }

    #[test]
    fn should_check_station_before_device_type() {
        let mut registry = Registry::new();
        let result = registry.create_device("tractor", StationId::new(0), DeviceOptions::default());
        assert!(matches!(result, Err(FarmError::NotFound(_))));
    }

    #[test]
    fn should_reject_unknown_device_type_without_mutation() {
        let (mut registry, station) = registry_with_station();
        let result = registry.create_device("tractor", station, DeviceOptions::default());

        assert!(matches!(
            result,
            Err(FarmError::Validation(ValidationError::UnknownDeviceType(ref t))) if t == "tractor"
        ));
        assert!(registry.station(station).unwrap().devices().is_empty());
        assert_eq!(registry.device_counter, 0);
    }

    #[test]
    fn should_reject_invalid_option_without_consuming_an_id() {
        let (mut registry, station) = registry_with_station();
        let bad = registry.create_device("soil", station, DeviceOptions::default().threshold(120.0));
        assert!(bad.is_err());

        let good = registry
            .create_device("weather", station, DeviceOptions::default())
            .unwrap();
        assert_eq!(good, DeviceId::new(0));
    }

    #[test]
    fn should_update_threshold_within_range() {
        let (mut registry, station) = registry_with_station();
        let id = registry
            .create_device("soil", station, DeviceOptions::default())
            .unwrap();

        let change = registry.modify_device(id, 55.0).unwrap();
        assert_eq!(change.setting, EditableSetting::MoistureThreshold);
        let threshold = registry.device(id).unwrap().as_soil_moisture().unwrap().threshold();
        assert!((threshold - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_threshold_of_150_and_keep_previous() {
        let (mut registry, station) = registry_with_station();
        let id = registry
            .create_device("soil", station, DeviceOptions::default().threshold(40.0))
            .unwrap();

        let result = registry.modify_device(id, 150.0);
        assert!(matches!(
            result,
            Err(FarmError::Validation(ValidationError::ThresholdOutOfRange(_)))
        ));
        let threshold = registry.device(id).unwrap().as_soil_moisture().unwrap().threshold();
        assert!((threshold - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_non_positive_flow_rate_edit() {
        let (mut registry, station) = registry_with_station();
        let id = registry
            .create_device("irrigation", station, DeviceOptions::default())
            .unwrap();
        assert!(matches!(
            registry.modify_device(id, 0.0),
            Err(FarmError::Validation(ValidationError::NonPositiveFlowRate(_)))
        ));
    }

    #[test]
    fn should_report_no_editable_settings_for_analyzer() {
        let (mut registry, station) = registry_with_station();
        let id = registry
            .create_device("crop", station, DeviceOptions::default())
            .unwrap();

        assert_eq!(registry.editable_setting(id).unwrap(), None);
        assert!(matches!(
            registry.modify_device(id, 10.0),
            Err(FarmError::Device(DeviceError::NoEditableSettings { .. }))
        ));
    }

    #[test]
    fn should_return_not_found_when_modifying_unknown_device() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.modify_device(DeviceId::new(3), 10.0),
            Err(FarmError::NotFound(_))
        ));
        assert!(matches!(
            registry.editable_setting(DeviceId::new(3)),
            Err(FarmError::NotFound(_))
        ));
    }

    #[test]
    fn should_return_to_original_status_after_toggling_twice() {
        let (mut registry, station) = registry_with_station();
        let id = registry
            .create_device("weather", station, DeviceOptions::default())
            .unwrap();

        assert_eq!(registry.toggle_device_status(id).unwrap(), DeviceStatus::On);
        assert_eq!(registry.toggle_device_status(id).unwrap(), DeviceStatus::Off);
        assert_eq!(registry.device(id).unwrap().status(), DeviceStatus::Off);
    }

    #[test]
    fn should_return_not_found_when_toggling_unknown_device() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.toggle_device_status(DeviceId::new(0)),
            Err(FarmError::NotFound(_))
        ));
    }

    #[test]
    fn should_list_station_devices_in_installation_order() {
        let (mut registry, station) = registry_with_station();
        let other = registry.create_station(5.0, 5.0);
        let a = registry
            .create_device("crop", station, DeviceOptions::default())
            .unwrap();
        registry
            .create_device("weather", other, DeviceOptions::default())
            .unwrap();
        let c = registry
            .create_device("soil", station, DeviceOptions::default())
            .unwrap();

        let ids: Vec<_> = registry
            .station_devices(station)
            .unwrap()
            .map(Device::id)
            .collect();
        assert_eq!(ids, [a, c]);
    }
}
