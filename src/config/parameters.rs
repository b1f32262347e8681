use serde::{Deserialize, Serialize};
use std::fs;

use crate::core::SubstitutionModel;
use crate::errors::PhylogenyError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Transition rate of the substitution model.
    pub alpha: f64,

    /// Transversion rate of the substitution model.
    pub beta: f64,

    /// Mean of the exponential waiting time between a node and its children.
    pub wait_time_mean: f64,

    /// Number of mutation events after which growth stops.
    pub epoch_budget: usize,

    /// Seed of the random source. A fresh seed is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum ParametersError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
}

impl std::error::Error for ParametersError {}

impl std::fmt::Display for ParametersError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParametersError::IoError(error) => write!(formatter, "IO error: {}", error),
            ParametersError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        write!(
            formatter,
            "{}",
            String::from_utf8(output).map_err(|_| std::fmt::Error)?
        )
    }
}

impl Parameters {
    /// Check all values before any simulation starts.
    pub fn validate(&self) -> Result<(), PhylogenyError> {
        self.substitution_model()?;
        if !self.wait_time_mean.is_finite() || self.wait_time_mean <= 0. {
            return Err(PhylogenyError::InvalidParameter(format!(
                "wait_time_mean must be positive, got {}",
                self.wait_time_mean
            )));
        }
        Ok(())
    }

    pub fn substitution_model(&self) -> Result<SubstitutionModel, PhylogenyError> {
        SubstitutionModel::new(self.alpha, self.beta)
    }

    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<(), ParametersError> {
        serde_yaml::to_writer(writer, self).map_err(ParametersError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> Result<Parameters, ParametersError> {
        serde_yaml::from_reader(reader).map_err(ParametersError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> Result<(), ParametersError> {
        let file = fs::File::create(filename).map_err(ParametersError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> Result<Parameters, ParametersError> {
        let file = fs::File::open(filename).map_err(ParametersError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMETERS: Parameters = Parameters {
        alpha: 0.6,
        beta: 0.3,
        wait_time_mean: 1.,
        epoch_budget: 3,
        seed: Some(42),
    };

    #[test]
    fn read_write() {
        let mut buffer = Vec::new();
        PARAMETERS.write(&mut buffer).unwrap();
        let read_parameters = Parameters::read(&mut buffer.as_slice()).unwrap();
        assert_eq!(read_parameters, PARAMETERS);
    }

    #[test]
    fn read_without_seed() {
        let yaml = "alpha: 0.5\nbeta: 0.25\nwait_time_mean: 2.0\nepoch_budget: 10\n";
        let parameters = Parameters::read(&mut yaml.as_bytes()).unwrap();
        assert_eq!(parameters.seed, None);
        assert_eq!(parameters.epoch_budget, 10);
    }

    #[test]
    fn read_write_file() {
        let tmp_dir = std::env::temp_dir().join("phylogenesy_test_parameters.yaml");
        let path = tmp_dir.to_str().unwrap();
        PARAMETERS.write_to_file(path).unwrap();
        let read_parameters = Parameters::read_from_file(path).unwrap();
        assert_eq!(read_parameters, PARAMETERS);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn validate() {
        assert!(PARAMETERS.validate().is_ok());
        let invalid = [
            Parameters {
                wait_time_mean: 0.,
                ..PARAMETERS
            },
            Parameters {
                alpha: -1.,
                ..PARAMETERS
            },
            Parameters {
                beta: f64::INFINITY,
                ..PARAMETERS
            },
        ];
        for parameters in invalid {
            assert!(matches!(
                parameters.validate(),
                Err(PhylogenyError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn display_as_yaml() {
        let output = PARAMETERS.to_string();
        assert!(output.contains("alpha: 0.6"));
        assert!(output.contains("seed: 42"));
    }
}
