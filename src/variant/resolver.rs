//! # Best-Match Resolution
//!
//! Picks the most specific [`ConfigVariant`] for a resource.
//!
//! ## Rules
//!
//! 1. Candidates are every variant whose pattern matches the full logical name.
//! 2. Density is removed from the resource's qualifiers before comparing.
//! 3. A qualifier-free resource takes the first qualifier-free candidate.
//! 4. Otherwise a candidate qualifies when each dimension it pins is present
//!    on the resource with the identical value.
//! 5. A qualifying candidate replaces the current best only if it pins every
//!    dimension the best pins (a dimension superset). A candidate pinning as
//!    many dimensions as the resource has ends the search.
//!
//! A qualifier-free candidate qualifies trivially under rule 4, but any
//! qualifying candidate with qualifiers covers it, so it can only be
//! returned when nothing more specific applies.
//!
//! The search is greedy over insertion order. It is a pure function of its
//! inputs; a returned variant is never one whose pinned dimensions are a
//! strict subset of another qualifying candidate's.

use crate::qualifier::{QualifiedAttributes, QualifierDimension};
use crate::resource::ResourceDescriptor;
use crate::variant::pool::{ConfigVariant, VariantPool};

impl VariantPool {
    /// Most specific variant for a resource called `name` with `attributes`,
    /// or `None` when no variant applies.
    pub fn get_best_match(
        &self,
        name: &str,
        attributes: &QualifiedAttributes,
    ) -> Option<&ConfigVariant> {
        let wanted = attributes.without(QualifierDimension::Density);
        let mut best: Option<&ConfigVariant> = None;

        for candidate in self.candidates(name) {
            let pinned = candidate.qualifiers();
            if wanted.is_empty() && pinned.is_empty() {
                return Some(candidate);
            }
            if !wanted.covers_dimensions_of(pinned) || !wanted.agrees_with(pinned) {
                continue;
            }
            let more_specific = best.is_none_or(|b| pinned.covers_dimensions_of(b.qualifiers()));
            if more_specific {
                best = Some(candidate);
                if pinned.len() == wanted.len() {
                    break;
                }
            }
        }
        best
    }

    /// [`get_best_match`](Self::get_best_match) for a described resource.
    pub fn best_match_for(&self, resource: &ResourceDescriptor) -> Option<&ConfigVariant> {
        self.get_best_match(resource.name(), resource.attributes())
    }
}
