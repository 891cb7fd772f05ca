//! The generation pipeline.
//!
//! Validation, sizing, weight mapping and prediction run lock-free in
//! [`SignGenerator::plan`]. Only [`SignGenerator::build`] takes the kernel.
//! A prediction never stops a build; callers that want to gate on it inspect
//! [`Plan::prediction`] between the two steps.

use crate::builder::{self, GeneratedLayers};
use crate::config::GeneratorConfig;
use crate::errors::GenerationFailure;
use crate::heaviness::{self, RenderProfile};
use crate::kernel::KernelHandle;
use crate::params::{SignRequest, SignSpec};
use crate::predict::{self, CutThroughPrediction};
use crate::sizing::{self, SizingResult};
use log::{info, warn};
use std::thread::{self, JoinHandle};

/// Everything decided about a request before any geometry exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub spec: SignSpec,
    pub sizing: SizingResult,
    pub profile: RenderProfile,
    pub prediction: CutThroughPrediction,
    /// Validation and sizing warnings, in that order.
    pub warnings: Vec<String>,
}

/// A built sign.
#[derive(Debug, Clone)]
pub struct Generated {
    pub plan: Plan,
    pub layers: GeneratedLayers,
}

impl Generated {
    pub fn into_layers(self) -> GeneratedLayers {
        self.layers
    }
}

#[derive(Debug, Clone)]
pub struct SignGenerator {
    config: GeneratorConfig,
    kernel: KernelHandle,
}

impl Default for SignGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl SignGenerator {
    /// A generator on the process-wide kernel. Builds from every generator
    /// made this way run one at a time.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_kernel(config, KernelHandle::shared())
    }

    /// A generator on `kernel`. Only builds through handles to the same
    /// kernel exclude each other.
    pub fn with_kernel(config: GeneratorConfig, kernel: KernelHandle) -> Self {
        Self { config, kernel }
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub const fn kernel(&self) -> &KernelHandle {
        &self.kernel
    }

    pub fn plan(&self, request: &SignRequest) -> Result<Plan, GenerationFailure> {
        let validated = request
            .validate(&self.config.limits)
            .map_err(GenerationFailure::new)?;
        let spec = validated.spec;

        let sizing = sizing::solve(&spec);
        let profile = heaviness::map_heaviness(spec.heaviness(), spec.font_family(), &self.config.buckets);
        let prediction = predict::predict(&spec, &sizing, &profile, &self.config.predictor);

        let mut warnings = validated.warnings;
        warnings.extend(sizing.warnings.iter().cloned());
        for warning in &warnings {
            warn!("{warning}");
        }
        if prediction.will_fail {
            warn!(
                "cut-through predicted ({}% confidence): {}",
                prediction.confidence_percent, prediction.reason
            );
        }

        Ok(Plan {
            spec,
            sizing,
            profile,
            prediction,
            warnings,
        })
    }

    /// Construct the layers for `plan`, holding the kernel for the duration.
    pub fn build(&self, plan: Plan) -> Result<Generated, GenerationFailure> {
        let result = builder::build_layers(
            &self.kernel,
            &plan.spec,
            &plan.sizing,
            &plan.profile,
            &self.config.build,
        );
        match result {
            Ok(layers) => {
                info!(
                    "generated {:?} ({}, {:.2} mm font): {} + {} triangles",
                    plan.spec.text(),
                    plan.profile.bucket.label(),
                    plan.sizing.resolved_font_size_mm,
                    layers.base.triangle_count(),
                    layers.top.triangle_count(),
                );
                Ok(Generated { plan, layers })
            },
            Err(error) => {
                let failure = GenerationFailure {
                    error,
                    prediction: Some(plan.prediction),
                    warnings: plan.warnings,
                };
                warn!("{failure}");
                Err(failure)
            },
        }
    }

    pub fn generate(&self, request: &SignRequest) -> Result<Generated, GenerationFailure> {
        let plan = self.plan(request)?;
        self.build(plan)
    }

    /// Run [`generate`](Self::generate) on a worker thread.
    pub fn spawn(&self, request: SignRequest) -> JoinHandle<Result<Generated, GenerationFailure>> {
        let generator = self.clone();
        thread::spawn(move || generator.generate(&request))
    }
}
