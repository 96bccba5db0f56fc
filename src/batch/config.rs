use crate::model::field::{to_field, PostFn};

#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Neighbor cutoff distance; atoms closer than (or exactly at) this
    /// distance become a directed edge pair.
    pub cutoff: f64,
    /// Representation conversion applied uniformly to every output array.
    pub post: PostFn,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            cutoff: 5.0,
            post: to_field,
        }
    }
}
