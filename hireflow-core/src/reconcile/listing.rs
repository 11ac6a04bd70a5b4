//! Resume listing reconciliation

use serde_json::Value;

use crate::domain::result::{GeneratedResumes, ResumeListing, ResumeSummary, SkippedFile};
use crate::reconcile::aliases::*;
use crate::reconcile::fields::Fields;

/// Maps a paginated resume listing onto [`ResumeListing`]
///
/// A bare array is accepted as the list itself, with `total` taken from its
/// length. For the object shapes every count is coerced like any other
/// numeric field and defaults to 0.
pub fn reconcile_listing(raw: &Value) -> ResumeListing {
    if let Value::Array(items) = raw {
        return ResumeListing {
            resumes: items.iter().map(resume_summary).collect(),
            total: items.len() as u64,
            ..Default::default()
        };
    }

    let f = Fields::of(raw);
    let resumes: Vec<ResumeSummary> = f.list(LISTED_RESUMES).iter().map(resume_summary).collect();
    ResumeListing {
        total: f.count(&["total", "count"]),
        page: f.count(&["page"]),
        page_size: f.count(&["page_size"]),
        resumes,
    }
}

/// Maps the resume generation response onto [`GeneratedResumes`]
pub fn reconcile_generated(raw: &Value) -> GeneratedResumes {
    let f = Fields::of(raw);
    let added: Vec<ResumeSummary> = f.list(ADDED_RESUMES).iter().map(resume_summary).collect();
    let skipped: Vec<SkippedFile> = f
        .list(&["skipped"])
        .iter()
        .map(|item| {
            let s = Fields::of(item);
            SkippedFile {
                filename: s.string(&["filename", "name"]),
                reason: s.string(&["reason", "error"]),
            }
        })
        .collect();

    GeneratedResumes {
        added_count: f.count(ADDED_COUNT),
        skipped_count: f.count(&["skipped_count"]),
        requested_count: f.count(&["requested_count", "count"]),
        added,
        skipped,
    }
}

fn resume_summary(value: &Value) -> ResumeSummary {
    let f = Fields::of(value);
    ResumeSummary {
        id: f.string(&["id"]),
        filename: f.string(&["filename", "file_name", "name"]),
        candidate_name: f.string(&["candidate_name"]),
        position_id: f.string(POSITION_ID),
        position_title: f.string(POSITION_TITLE),
        status: f.string(&["status"]),
        file_size: f.count(&["file_size", "size"]),
        created_at: f.string(&["created_at"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_and_current_listing_agree() {
        let legacy = json!({
            "items": [{"id": "r-1", "filename": "lin.pdf", "group_id": "g-1", "group_name": "Backend", "file_size": 1024}],
            "total": 1,
            "page": 1,
            "page_size": 20
        });
        let current = json!({
            "resumes": [{"id": "r-1", "filename": "lin.pdf", "position_id": "g-1", "position_title": "Backend", "file_size": 1024}],
            "total": 1,
            "page": 1,
            "page_size": 20
        });

        let a = reconcile_listing(&legacy);
        assert_eq!(a, reconcile_listing(&current));
        assert_eq!(a.resumes[0].position_title.as_deref(), Some("Backend"));
        assert_eq!(a.page_size, 20);
    }

    #[test]
    fn test_bare_array_listing() {
        let listing = reconcile_listing(&json!([{"id": "a"}, {"id": "b"}]));
        assert_eq!(listing.total, 2);
        assert_eq!(listing.page, 0);
        assert_eq!(listing.page_size, 0);
        assert_eq!(listing.resumes[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_missing_listing_fields_default() {
        let listing = reconcile_listing(&json!({"resumes": [{"id": 7}]}));
        assert_eq!(listing.resumes.len(), 1);
        assert_eq!(listing.total, 0);
        assert_eq!(listing.resumes[0].id.as_deref(), Some("7"));
        assert_eq!(listing.resumes[0].file_size, 0);

        assert_eq!(reconcile_listing(&json!(null)), ResumeListing::default());
    }

    #[test]
    fn test_listing_counts_are_coerced() {
        let listing = reconcile_listing(&json!({"items": [], "total": "3", "page": 2.0, "page_size": "10"}));
        assert_eq!(listing.total, 3);
        assert_eq!(listing.page, 2);
        assert_eq!(listing.page_size, 10);

        assert_eq!(reconcile_listing(&json!({"resumes": [], "count": 4.0})).total, 4);
    }

    #[test]
    fn test_generated_resumes() {
        let generated = reconcile_generated(&json!({
            "uploaded": [{"id": "n-1", "filename": "gen_1.pdf"}],
            "skipped": [{"filename": "gen_2.pdf", "reason": "duplicate"}],
            "uploaded_count": "1",
            "skipped_count": 1.0,
            "requested_count": 2
        }));
        assert_eq!(generated.added.len(), 1);
        assert_eq!(generated.added_count, 1);
        assert_eq!(generated.skipped_count, 1);
        assert_eq!(generated.requested_count, 2);
        assert_eq!(generated.skipped[0].reason.as_deref(), Some("duplicate"));
    }

    #[test]
    fn test_generated_counts_default_to_zero() {
        let generated = reconcile_generated(&json!({"added": [{"id": "n-1"}], "skipped": [{}]}));
        assert_eq!(generated.added.len(), 1);
        assert_eq!(generated.skipped.len(), 1);
        assert_eq!(generated.added_count, 0);
        assert_eq!(generated.skipped_count, 0);
        assert_eq!(generated.requested_count, 0);
    }
}
