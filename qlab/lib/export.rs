//! Snapshot of a solved configuration for export.

use serde::Serialize;
use crate::{
    config::{ CustomPotential, Parameters },
    error::{ ConfigError, LengthError },
    observables::QuantumProperties,
    potential::Family,
    solve::{ Spectrum, System },
};

/// Sampled arrays of a solved system.
#[derive(Clone, Debug, Serialize)]
pub struct SnapshotData {
    /// Grid positions.
    pub x: Vec<f64>,
    /// One array per eigenstate, ascending in energy.
    pub wavefunctions: Vec<Vec<f64>>,
    /// Eigenenergies.
    pub energies: Vec<f64>,
    /// Potential profile.
    pub potential: Vec<f64>,
}

/// A structured record of the current parameters and results.
///
/// ```
/// use qlab::{
///     config::Parameters,
///     export::Snapshot,
///     potential::Family,
///     solve::System,
/// };
///
/// let params = Parameters::default();
/// let system = System::new(Family::Harmonic, &params, None, 64).unwrap();
/// let spectrum = system.solve(params.num_states).unwrap();
/// let snapshot = Snapshot::new(&params, None, &system, &spectrum).unwrap();
/// let json = snapshot.to_json().unwrap();
/// assert!(json.contains("\"quantumProperties\""));
/// ```
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub parameters: Parameters,
    /// Tag of the selected potential family.
    pub potential: Family,
    pub custom_potential: CustomPotential,
    /// Ground-state spreads; absent if no states were computed.
    pub quantum_properties: Option<QuantumProperties>,
    /// `true` if the states are placeholders.
    pub used_fallback: bool,
    pub data: SnapshotData,
}

impl Snapshot {
    /// Assemble a snapshot from a solved system.
    pub fn new(
        params: &Parameters,
        custom: Option<&CustomPotential>,
        system: &System,
        spectrum: &Spectrum,
    ) -> Result<Self, LengthError>
    {
        let quantum_properties
            = QuantumProperties::of_ground(system.get_grid(), system.get_V(), spectrum)?;
        let data = SnapshotData {
            x: system.get_x().to_vec(),
            wavefunctions: spectrum.iter().map(|sol| sol.wf.to_vec()).collect(),
            energies: spectrum.energies().to_vec(),
            potential: system.get_V().to_vec(),
        };
        Ok(Self {
            parameters: params.clone(),
            potential: system.get_family(),
            custom_potential: custom.cloned().unwrap_or_default(),
            quantum_properties,
            used_fallback: spectrum.used_fallback(),
            data,
        })
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::JsonConfig;
    use super::*;

    #[test]
    fn document_layout() {
        let params = Parameters { num_states: 3, ..Parameters::default() };
        let custom = CustomPotential { function: "x^2".into(), ..CustomPotential::default() };
        let system = System::new(Family::Custom, &params, Some(&custom), 40).unwrap();
        let spectrum = system.solve(params.num_states).unwrap();
        let snapshot = Snapshot::new(&params, Some(&custom), &system, &spectrum).unwrap();
        assert_eq!(snapshot.data.wavefunctions.len(), 3);
        assert!(snapshot.data.wavefunctions.iter().all(|wf| wf.len() == 40));

        let value: serde_json::Value
            = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["potential"], "custom");
        assert_eq!(value["customPotential"]["function"], "x^2");
        assert_eq!(value["parameters"]["numStates"], 3);
        assert!(value["quantumProperties"]["uncertaintyProduct"].is_f64());
        assert_eq!(value["data"]["x"].as_array().map(Vec::len), Some(40));
        assert_eq!(value["data"]["energies"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["usedFallback"], false);

        // round trip the parameters back out of the document
        let back = Parameters::from_json(&value["parameters"].to_string()).unwrap();
        assert_eq!(back, params);
    }
}
