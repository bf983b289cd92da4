//! Selection resolution: index list → selected features.
//!
//! Index lists come straight from the application and are not validated.
//! Duplicates are kept and out-of-range indexes resolve to `None`
//! placeholders so the output always lines up with the input.

use crate::model::{Feature, FeatureCollection};
use std::sync::Arc;

/// One slot per selected index, in index-list order.
#[must_use]
pub fn selected_features(
    data: Option<&FeatureCollection>,
    indexes: Option<&[usize]>,
) -> Vec<Option<Arc<Feature>>> {
    let Some(indexes) = indexes else {
        return Vec::new();
    };
    indexes
        .iter()
        .map(|&i| data.and_then(|fc| fc.get(i)).cloned())
        .collect()
}

/// Whether `feature` (by identity) sits at a selected index of `data`.
///
/// Always false when either the collection or the index list is absent or
/// empty.
pub fn is_feature_selected(
    data: Option<&FeatureCollection>,
    indexes: Option<&[usize]>,
    feature: &Feature,
) -> bool {
    let (Some(data), Some(indexes)) = (data, indexes) else {
        return false;
    };
    if indexes.is_empty() {
        return false;
    }
    data.position_of(feature)
        .is_some_and(|i| indexes.contains(&i))
}
