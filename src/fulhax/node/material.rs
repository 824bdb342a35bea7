//! Material node.

use std::io::Write;

use crate::fulhax::format::DEFAULT_MATERIAL_NAME;
use crate::fulhax::writer::{string_size, OStream};
use crate::util::Result;

/// Named material reference. The engine resolves shaders by this name.
///
/// Also used as the placeholder record for objects in an ancestor chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialNode {
    pub name: String,
}

impl MaterialNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub(crate) fn payload_len(&self) -> u64 {
        string_size(&self.name)
    }

    pub(crate) fn write_payload<W: Write>(&self, stream: &mut OStream<W>) -> Result<()> {
        stream.write_string(&self.name)
    }
}

impl Default for MaterialNode {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL_NAME)
    }
}
