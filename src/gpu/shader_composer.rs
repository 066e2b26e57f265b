use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::MirageError;

/// Every top-level shader the renderer composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shader {
    /// Scene node shader shared by all five topology pipelines.
    Node,
}

impl Shader {
    /// All shaders, for exhaustive composition checks.
    pub const ALL: [Shader; 1] = [Shader::Node];

    fn source(self) -> &'static str {
        match self {
            Self::Node => include_str!("../../assets/shaders/node.wgsl"),
        }
    }

    fn file_path(self) -> &'static str {
        match self {
            Self::Node => "node.wgsl",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Node => "Node Shader",
        }
    }
}

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared WGSL modules, in dependency order.
const MODULES: &[ModuleDef] = &[ModuleDef {
    source: include_str!("../../assets/shaders/modules/camera.wgsl"),
    file_path: "modules/camera.wgsl",
}];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared modules are registered at construction. Consuming shaders use
/// `#import mirage::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`MirageError::Pipeline`] if a shared module fails to parse.
    pub fn new() -> Result<Self, MirageError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    MirageError::Pipeline(format!(
                        "failed to register shader module '{}': {e}",
                        m.file_path
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose `shader` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`MirageError::Pipeline`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        shader: Shader,
    ) -> Result<wgpu::ShaderModule, MirageError> {
        let naga_module = self
            .compose_naga(shader.source(), shader.file_path())
            .map_err(|e| {
                MirageError::Pipeline(format!(
                    "failed to compose shader '{}': {e}",
                    shader.file_path()
                ))
            })?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shader.label()),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a
    /// wgpu shader module. Useful for testing shader composition without a
    /// GPU device.
    ///
    /// # Errors
    ///
    /// Returns the composer error if the source fails to compose.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, Box<ComposerError>> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(Box::new)
    }
}
