use crate::errors::{Error, ErrorKind};
use std::{fmt, str::FromStr};

/// Remote content class served by the index. Each one owns a URL segment
/// and the suffix its files carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Datasets,
    PretrainedModels,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Datasets, Category::PretrainedModels];

    pub fn segment(&self) -> &'static str {
        match self {
            Category::Datasets => "datasets",
            Category::PretrainedModels => "pretrained_models",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Category::Datasets => ".zip",
            Category::PretrainedModels => ".pth",
        }
    }

    /// Name of the remote file for `key` in this category.
    pub fn file_name(&self, key: &str) -> String {
        format!("{}{}", key, self.suffix())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.segment() == s)
            .ok_or_else(|| ErrorKind::UnknownCategory(s.to_string()).into())
    }
}
