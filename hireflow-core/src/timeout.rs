//! Timeout policy
//!
//! Generative operations chain several sequential model calls on the
//! remote side, so their budget must exceed the worst-case sequential
//! latency. Batch-sized operations scale with the batch.

use std::time::Duration;

use crate::domain::job::JobKind;

/// Budget for status polls, cancellations and plain CRUD calls
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Floor of the resume generation budget
pub const RESUME_GENERATION_MIN_MS: u64 = 120_000;
/// Per-resume share of the resume generation budget
pub const RESUME_GENERATION_PER_ITEM_MS: u64 = 20_000;
/// Fixed buffer added to the resume generation budget
pub const RESUME_GENERATION_BUFFER_MS: u64 = 30_000;

/// A remote call whose timeout is being decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Job submission
    Submit(JobKind),
    /// Dev tool: generate `count` resumes in one call
    ResumeGeneration { count: u32 },
    /// Status poll for a tracked job
    StatusPoll(JobKind),
    /// Remote cancellation of a tracked job
    Cancel(JobKind),
    /// Anything else
    Default,
}

/// Timeout in milliseconds for an operation
pub fn timeout_ms(op: Operation) -> u64 {
    match op {
        Operation::Submit(JobKind::Screening) => 60_000,
        Operation::Submit(JobKind::InterviewQuestionGen) => 90_000,
        Operation::Submit(JobKind::QaRound) => 60_000,
        Operation::Submit(JobKind::ReportGeneration) => 60_000,
        Operation::Submit(JobKind::RecommendationAnalysis) => 120_000,
        Operation::ResumeGeneration { count } => RESUME_GENERATION_MIN_MS.max(
            u64::from(count)
                .saturating_mul(RESUME_GENERATION_PER_ITEM_MS)
                .saturating_add(RESUME_GENERATION_BUFFER_MS),
        ),
        Operation::Submit(JobKind::VideoAnalysis)
        | Operation::StatusPoll(_)
        | Operation::Cancel(_)
        | Operation::Default => DEFAULT_TIMEOUT_MS,
    }
}

/// Timeout for an operation
pub fn timeout_for(op: Operation) -> Duration {
    Duration::from_millis(timeout_ms(op))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_generation_scales_with_count() {
        assert_eq!(timeout_ms(Operation::ResumeGeneration { count: 5 }), 130_000);
        assert_eq!(timeout_ms(Operation::ResumeGeneration { count: 1 }), 120_000);
        assert_eq!(timeout_ms(Operation::ResumeGeneration { count: 4 }), 120_000);
        assert_eq!(timeout_ms(Operation::ResumeGeneration { count: 10 }), 230_000);
    }

    #[test]
    fn test_resume_generation_does_not_overflow() {
        let ms = timeout_ms(Operation::ResumeGeneration { count: u32::MAX });
        assert_eq!(ms, u64::from(u32::MAX) * 20_000 + 30_000);
    }

    #[test]
    fn test_fixed_submission_budgets() {
        assert_eq!(timeout_ms(Operation::Submit(JobKind::Screening)), 60_000);
        assert_eq!(timeout_ms(Operation::Submit(JobKind::InterviewQuestionGen)), 90_000);
        assert_eq!(timeout_ms(Operation::Submit(JobKind::QaRound)), 60_000);
        assert_eq!(timeout_ms(Operation::Submit(JobKind::ReportGeneration)), 60_000);
        assert_eq!(timeout_ms(Operation::Submit(JobKind::RecommendationAnalysis)), 120_000);
        assert_eq!(timeout_ms(Operation::Submit(JobKind::VideoAnalysis)), 60_000);
    }

    #[test]
    fn test_default_budget() {
        for kind in JobKind::ALL {
            assert_eq!(timeout_for(Operation::StatusPoll(kind)), Duration::from_secs(60));
            assert_eq!(timeout_for(Operation::Cancel(kind)), Duration::from_secs(60));
        }
        assert_eq!(timeout_for(Operation::Default), Duration::from_secs(60));
    }
}
