//! Extraction of reportable causes and grouping them by the position they resolve to.

use crate::{Cause, Status};
use kvlint_yaml::{Position, ResolveError, Resolver};
use log::trace;
use std::collections::BTreeMap;

/// A cause together with the field path it is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCause<'c> {
    pub field: &'c str,
    pub cause: &'c Cause,
}

/// The causes of a single document keyed by the position they resolved to.
///
/// Iteration is in ascending position order, line first then column.
pub type GroupedCauses<'c> = BTreeMap<Position, Vec<FieldCause<'c>>>;

/// The causes of a document which can be reported, in input order.
///
/// A document is only reported if every one of its validation attempts failed,
/// a single success yields no causes at all. Causes without a field are dropped
/// since there is nothing to point at.
pub fn addressable_causes(statuses: &[Status]) -> Vec<FieldCause<'_>> {
    if statuses.iter().any(Status::is_success) {
        return vec![];
    }

    statuses
        .iter()
        .flat_map(Status::causes)
        .filter_map(|cause| {
            let field = cause.field.as_deref()?;
            Some(FieldCause { field, cause })
        })
        .collect()
}

/// Resolve every cause against an already parsed document.
pub fn group_causes<'c>(
    causes: &[FieldCause<'c>],
    resolver: &Resolver,
) -> Result<GroupedCauses<'c>, ResolveError> {
    let mut grouped = GroupedCauses::new();
    for cause in causes {
        let position = resolver.resolve(cause.field)?;
        trace!("resolved `{}` to {}", cause.field, position);
        grouped.entry(position).or_insert_with(Vec::new).push(*cause);
    }
    Ok(grouped)
}

/// Group the reportable causes of a document by position.
///
/// The document is only parsed if there is at least one cause to resolve.
pub fn group<'c>(statuses: &'c [Status], source: &[u8]) -> Result<GroupedCauses<'c>, ResolveError> {
    let causes = addressable_causes(statuses);
    if causes.is_empty() {
        return Ok(GroupedCauses::new());
    }
    let resolver = Resolver::parse(source)?;
    group_causes(&causes, &resolver)
}
