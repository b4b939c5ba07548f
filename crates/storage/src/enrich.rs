//! Display enrichment
//!
//! Copies each referent's display label into the reference values of a record
//! about to be returned to a caller. Labels are recomputed on every read and
//! never written back to storage.

use brickhouse_core::{Record, Resolver, Value, ID_FIELD};

/// Attach current display labels to the reference fields of `record`
///
/// - The `id` field is never touched.
/// - A field whose referent is absent, or has no non-empty `dis`, keeps the
///   label it already had.
/// - One hop only: the referent's own references are not visited.
pub fn fill_dis(record: &mut Record, resolver: &dyn Resolver) {
    for (name, value) in record.iter_mut() {
        if name == ID_FIELD {
            continue;
        }
        let Value::Ref(reference) = value else {
            continue;
        };
        let label = resolver
            .find(reference.id())
            .and_then(|referent| referent.dis().map(str::to_owned));
        if let Some(label) = label {
            *reference = reference.relabel(label);
        }
    }
}
