/// What to do with a match arm whose tag was never observed on the scrutinee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownArmPolicy {
    /// Drop the arm without checking its body
    #[default]
    Skip,
    /// Report the arm as an error
    Reject,
}

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Extension appended to module names given to `require`
    pub source_extension: String,
    pub unknown_arms: UnknownArmPolicy,
    /// How many function bodies may be executing inside each other
    pub max_specialization_depth: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            source_extension: "brie".to_string(),
            unknown_arms: UnknownArmPolicy::Skip,
            max_specialization_depth: 64,
        }
    }
}

impl CheckerConfig {
    pub fn with_unknown_arms(mut self, policy: UnknownArmPolicy) -> Self {
        self.unknown_arms = policy;
        self
    }

    pub fn with_max_specialization_depth(mut self, depth: usize) -> Self {
        self.max_specialization_depth = depth;
        self
    }

    pub fn with_source_extension(mut self, extension: &str) -> Self {
        self.source_extension = extension.to_string();
        self
    }
}
