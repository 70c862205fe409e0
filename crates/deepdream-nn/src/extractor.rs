use deepdream_image::Image;

use crate::error::NnError;
use crate::objective::{LayerInfo, Objective};

/// A fixed feed-forward network that can differentiate an activation objective
/// with respect to its input pixels.
pub trait FeatureExtractor {
    /// The named layers of the network, in evaluation order, with their channel counts.
    fn layers(&self) -> Vec<LayerInfo>;

    /// The gradient of `objective` with respect to `image`, with the network parameters fixed.
    ///
    /// The returned image has the same size as `image`.
    fn objective_gradient(
        &self,
        objective: &Objective,
        image: &Image<f32, 3>,
    ) -> Result<Image<f32, 3>, NnError>;

    /// Validate `objective` once and bind it into a gradient function.
    ///
    /// # Errors
    ///
    /// Returns the validation error of [`Objective::validate`] if the objective does
    /// not match the network.
    fn gradient_fn<'a>(
        &'a self,
        objective: &'a Objective,
    ) -> Result<impl FnMut(&Image<f32, 3>) -> Result<Image<f32, 3>, NnError> + 'a, NnError>
    where
        Self: Sized,
    {
        objective.validate(&self.layers())?;
        Ok(move |image: &Image<f32, 3>| self.objective_gradient(objective, image))
    }
}
