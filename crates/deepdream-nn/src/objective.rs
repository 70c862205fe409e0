use crate::error::NnError;

/// A named layer of a network and its number of feature channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerInfo {
    /// The layer name.
    pub name: String,
    /// The number of output channels of the layer.
    pub channels: usize,
}

/// The scalar being maximized.
///
/// With no feature selected the objective is the mean of the squared activations
/// of the whole layer; otherwise it is the mean activation of one channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Objective {
    /// The layer whose activations define the objective.
    pub layer: String,
    /// The selected feature channel, `None` for the whole layer.
    pub feature: Option<usize>,
}

impl Objective {
    /// Whole-layer objective: mean of squared activations.
    pub fn layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            feature: None,
        }
    }

    /// Single channel objective: mean activation of `feature`.
    pub fn feature(layer: impl Into<String>, feature: usize) -> Self {
        Self {
            layer: layer.into(),
            feature: Some(feature),
        }
    }

    /// Build an objective from a signed feature index, negative meaning the whole layer.
    ///
    /// ```
    /// use deepdream_nn::Objective;
    ///
    /// assert_eq!(Objective::from_feature_index("conv", -1).feature, None);
    /// assert_eq!(Objective::from_feature_index("conv", 7).feature, Some(7));
    /// ```
    pub fn from_feature_index(layer: impl Into<String>, feature: i64) -> Self {
        Self {
            layer: layer.into(),
            feature: usize::try_from(feature).ok(),
        }
    }

    /// Check the objective against the layers of a network.
    ///
    /// # Errors
    ///
    /// [`NnError::UnknownLayer`] if the layer is missing and
    /// [`NnError::FeatureOutOfRange`] if the feature exceeds the layer's channels.
    pub fn validate(&self, layers: &[LayerInfo]) -> Result<(), NnError> {
        let info = layers
            .iter()
            .find(|info| info.name == self.layer)
            .ok_or_else(|| NnError::UnknownLayer(self.layer.clone()))?;

        match self.feature {
            Some(feature) if feature >= info.channels => Err(NnError::FeatureOutOfRange {
                layer: self.layer.clone(),
                feature,
                channels: info.channels,
            }),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.feature {
            Some(feature) => write!(f, "{}[{}]", self.layer, feature),
            None => write!(f, "{}", self.layer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layers() -> Vec<LayerInfo> {
        vec![
            LayerInfo {
                name: "features.0".to_string(),
                channels: 8,
            },
            LayerInfo {
                name: "features.2".to_string(),
                channels: 16,
            },
        ]
    }

    #[test]
    fn validate_accepts_known_layer() -> Result<(), NnError> {
        Objective::layer("features.2").validate(&layers())?;
        Objective::feature("features.2", 15).validate(&layers())?;
        Ok(())
    }

    #[test]
    fn validate_rejects_unknown_layer() {
        let res = Objective::layer("mixed4c").validate(&layers());
        assert!(matches!(res, Err(NnError::UnknownLayer(name)) if name == "mixed4c"));
    }

    #[test]
    fn validate_rejects_out_of_range_feature() {
        let res = Objective::feature("features.0", 8).validate(&layers());
        assert!(matches!(
            res,
            Err(NnError::FeatureOutOfRange {
                feature: 8,
                channels: 8,
                ..
            })
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Objective::layer("a").to_string(), "a");
        assert_eq!(Objective::feature("a", 3).to_string(), "a[3]");
    }
}
