use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Module, Tensor, Var};
use candle_nn::{Conv2d, Conv2dConfig, VarBuilder};

use deepdream_image::Image;

use crate::error::NnError;
use crate::extractor::FeatureExtractor;
use crate::objective::{LayerInfo, Objective};

/// Description of one convolution stage of a [`ConvNet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvLayerConfig {
    /// The layer name, also the weight prefix in the var builder.
    pub name: String,
    /// Number of input channels.
    pub in_channels: usize,
    /// Number of output channels.
    pub out_channels: usize,
    /// Square kernel size, padded to keep the spatial size.
    pub kernel_size: usize,
    /// Whether the layer has a bias term.
    pub bias: bool,
    /// Apply a 2x2 max pooling on the input of this stage.
    pub pool_before: bool,
}

#[derive(Debug)]
struct ConvStage {
    name: String,
    channels: usize,
    pool_before: bool,
    conv: Conv2d,
}

/// A plain feed-forward stack of `conv -> relu` stages with optional max pooling.
///
/// This matches the `features` part of VGG-style classifiers. The network takes
/// an interleaved RGB image in the `[0, 255]` range and subtracts `input_mean`
/// before the first convolution.
#[derive(Debug)]
pub struct ConvNet {
    stages: Vec<ConvStage>,
    input_mean: f32,
    device: Device,
}

impl ConvNet {
    /// Build the network from a var builder and the stage descriptions.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::EmptyModel`] when no stages are given, or the candle error
    /// when a weight is missing or has the wrong shape.
    pub fn new(
        vb: VarBuilder,
        configs: &[ConvLayerConfig],
        input_mean: f32,
    ) -> Result<Self, NnError> {
        if configs.is_empty() {
            return Err(NnError::EmptyModel);
        }

        let device = vb.device().clone();

        let stages = configs
            .iter()
            .map(|config| {
                let conv_config = Conv2dConfig {
                    padding: config.kernel_size / 2,
                    ..Default::default()
                };
                let vb = vb.pp(&config.name);
                let conv = if config.bias {
                    candle_nn::conv2d(
                        config.in_channels,
                        config.out_channels,
                        config.kernel_size,
                        conv_config,
                        vb,
                    )?
                } else {
                    candle_nn::conv2d_no_bias(
                        config.in_channels,
                        config.out_channels,
                        config.kernel_size,
                        conv_config,
                        vb,
                    )?
                };
                Ok::<_, NnError>(ConvStage {
                    name: config.name.clone(),
                    channels: config.out_channels,
                    pool_before: config.pool_before,
                    conv,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            stages,
            input_mean,
            device,
        })
    }

    /// Load the network from a safetensors file on the cpu.
    ///
    /// Every rank-4 tensor named `<prefix>.<index>.weight` becomes a convolution
    /// stage named `<prefix>.<index>`, ordered by index. A gap of three or more
    /// between consecutive indices marks a pooling layer, as in the torchvision
    /// `features` numbering where `conv, relu, pool` occupy three slots.
    ///
    /// # Errors
    ///
    /// Returns [`NnError::ModelFileDoesNotExist`] for a missing path,
    /// [`NnError::EmptyModel`] if no convolution weights are found and
    /// [`NnError::UnsupportedLayerName`] if a weight name has no numeric index.
    pub fn from_safetensors(path: impl AsRef<Path>, input_mean: f32) -> Result<Self, NnError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NnError::ModelFileDoesNotExist(path.to_path_buf()));
        }

        let device = Device::Cpu;
        let tensors = candle_core::safetensors::load(path, &device)?;
        let configs = layer_configs_from_tensors(&tensors)?;

        log::debug!(
            "loaded {} tensors and {} convolution layers from {}",
            tensors.len(),
            configs.len(),
            path.display()
        );

        let vb = VarBuilder::from_tensors(tensors, DType::F32, &device);
        Self::new(vb, &configs, input_mean)
    }

    /// The value subtracted from every pixel before the first layer.
    pub fn input_mean(&self) -> f32 {
        self.input_mean
    }

    // run the stages up to `last` included, None if the activation map collapses to zero size
    fn forward_to(&self, input: &Tensor, last: usize) -> Result<Option<Tensor>, NnError> {
        let mut x = input.clone();
        for stage in &self.stages[..=last] {
            if stage.pool_before {
                let (_, _, h, w) = x.dims4()?;
                if h < 2 || w < 2 {
                    return Ok(None);
                }
                x = x.max_pool2d(2)?;
            }
            x = stage.conv.forward(&x)?.relu()?;
        }
        Ok(Some(x))
    }
}

impl FeatureExtractor for ConvNet {
    fn layers(&self) -> Vec<LayerInfo> {
        self.stages
            .iter()
            .map(|stage| LayerInfo {
                name: stage.name.clone(),
                channels: stage.channels,
            })
            .collect()
    }

    fn objective_gradient(
        &self,
        objective: &Objective,
        image: &Image<f32, 3>,
    ) -> Result<Image<f32, 3>, NnError> {
        let last = self
            .stages
            .iter()
            .position(|stage| stage.name == objective.layer)
            .ok_or_else(|| NnError::UnknownLayer(objective.layer.clone()))?;

        if let Some(feature) = objective.feature {
            let channels = self.stages[last].channels;
            if feature >= channels {
                return Err(NnError::FeatureOutOfRange {
                    layer: objective.layer.clone(),
                    feature,
                    channels,
                });
            }
        }

        let (h, w) = (image.height(), image.width());
        let pixels = Var::from_tensor(&Tensor::from_slice(
            image.as_slice(),
            (h, w, 3),
            &self.device,
        )?)?;

        // HWC in [0, 255] -> 1xCxHxW centered
        let input = (pixels.as_tensor() - self.input_mean as f64)?
            .permute((2, 0, 1))?
            .unsqueeze(0)?
            .contiguous()?;

        let Some(activation) = self.forward_to(&input, last)? else {
            log::debug!(
                "layer {} has no activations for a {}x{} input",
                objective.layer,
                w,
                h
            );
            return Ok(Image::from_size_val(image.size(), 0.0)?);
        };

        let score = match objective.feature {
            Some(feature) => activation.narrow(1, feature, 1)?.mean_all()?,
            None => activation.sqr()?.mean_all()?,
        };

        let grads = score.backward()?;
        let grad = grads
            .get(pixels.as_tensor())
            .ok_or_else(|| NnError::MissingGradient(objective.layer.clone()))?;

        let data = grad.flatten_all()?.to_vec1::<f32>()?;
        Ok(Image::new(image.size(), data)?)
    }
}

/// Derive the stage layout from the convolution weights of a tensor map.
fn layer_configs_from_tensors(
    tensors: &HashMap<String, Tensor>,
) -> Result<Vec<ConvLayerConfig>, NnError> {
    let mut layers = Vec::new();
    for (key, tensor) in tensors {
        let Some(name) = key.strip_suffix(".weight") else {
            continue;
        };
        let Ok((out_channels, in_channels, kernel_size, _)) = tensor.dims4() else {
            continue;
        };
        let index = name
            .rsplit('.')
            .next()
            .and_then(|idx| idx.parse::<usize>().ok())
            .ok_or_else(|| NnError::UnsupportedLayerName(key.clone()))?;
        let bias = tensors.contains_key(&format!("{name}.bias"));
        layers.push((
            index,
            ConvLayerConfig {
                name: name.to_string(),
                in_channels,
                out_channels,
                kernel_size,
                bias,
                pool_before: false,
            },
        ));
    }

    if layers.is_empty() {
        return Err(NnError::EmptyModel);
    }

    layers.sort_by_key(|(index, _)| *index);

    let mut prev_index = None;
    let configs = layers
        .into_iter()
        .map(|(index, mut config)| {
            config.pool_before = prev_index.is_some_and(|prev: usize| index - prev >= 3);
            prev_index = Some(index);
            config
        })
        .collect();

    Ok(configs)
}
