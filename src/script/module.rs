use std::str::FromStr;

use crate::error::ScriptError;

/// Environment modules the SGE template knows how to load
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Module {
    Python,
    Java,
    Gatk,
    R,
}

impl Module {
    /// Module path passed to `module load`
    pub fn path(&self) -> &'static str {
        match self {
            Module::Python => "apps/python/2.7",
            Module::Java => "apps/java/1.7",
            Module::Gatk => "apps/binapps/GATK",
            Module::R => "apps/R/3.2.1",
        }
    }
}

impl FromStr for Module {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Module::Python),
            "java" => Ok(Module::Java),
            "gatk" => Ok(Module::Gatk),
            "R" => Ok(Module::R),
            _ => Err(ScriptError::UnknownModule(s.to_string())),
        }
    }
}
