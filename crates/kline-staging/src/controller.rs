//! The file-staging controller.
//!
//! [`FileStagingController`] owns the [`StagingList`] for one form
//! interaction. Hosts feed it picker and drop batches, draw whatever
//! [`render`](FileStagingController::render) and
//! [`submit_button`](FileStagingController::submit_button) return after
//! every call, and ask it for a [`Submission`] when the form is sent.
//!
//! ```text
//! candidate ──validate──┬── Staged ──remove──> Removed
//!                       └── Rejected
//! whole list ──prepare_submission──> Submitting (frozen)
//! ```

use crate::list::StagingList;
use crate::render::{self, RemoveToken, RenderedList};
use crate::types::{FileMeta, StagedFile, StagingError, ValidationPolicy};
use crate::validate;

/// Multipart field name every staged file is attached under.
pub const FILES_FIELD: &str = "files";

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting additions and removals.
    #[default]
    Collecting,
    /// A submission was handed out; the staged set is frozen until the
    /// page navigates away or [`reset`](FileStagingController::reset)
    /// is called.
    Submitting,
}

/// Visible state of the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    /// Whether the control accepts clicks.
    pub enabled: bool,
    /// Whether the in-progress indicator is shown.
    pub busy: bool,
    /// Button text.
    pub label: String,
}

/// The ordered file handles to attach to the outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<H> {
    /// Multipart field name shared by all files.
    pub field_name: &'static str,
    /// Raw handles in staging order.
    pub handles: Vec<H>,
}

impl<H> Submission<H> {
    /// Number of files in the submission.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.handles.len()
    }

    /// Always `false` for a submission produced by the controller.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Owns the staging list and enforces the validation policy.
#[derive(Debug, Clone)]
pub struct FileStagingController<H> {
    policy: ValidationPolicy,
    list: StagingList<H>,
    phase: Phase,
    /// Bumped on every list mutation; stamped into rendered tokens.
    revision: u64,
}

impl<H> FileStagingController<H> {
    /// Create a controller with an empty list.
    #[must_use]
    pub const fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            list: StagingList::new(),
            phase: Phase::Collecting,
            revision: 0,
        }
    }

    /// The active validation policy.
    #[must_use]
    pub const fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// The staged files, in order.
    #[must_use]
    pub const fn files(&self) -> &StagingList<H> {
        &self.list
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Revision of the current list contents.
    ///
    /// Changes whenever a file is added or removed, so a
    /// [`RemoveToken`] from an earlier render no longer matches.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` once a submission has been handed out.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Check a candidate without staging it.
    ///
    /// # Errors
    ///
    /// See [`validate::validate`].
    pub fn validate(&self, meta: &FileMeta) -> Result<(), StagingError> {
        validate::validate(meta, &self.list, &self.policy)
    }

    /// Validate a candidate and append it to the list on success.
    ///
    /// # Errors
    ///
    /// Returns [`StagingError::SubmissionInProgress`] while
    /// [`Phase::Submitting`], otherwise the first validation failure.
    /// Either way the list is unchanged.
    pub fn add_candidate(&mut self, meta: FileMeta, handle: H) -> Result<(), StagingError> {
        if self.is_submitting() {
            return Err(StagingError::SubmissionInProgress);
        }
        self.validate(&meta)?;
        self.list.push(StagedFile::new(meta, handle));
        self.bump();
        Ok(())
    }

    /// Stage a whole picker or drop batch, in order.
    ///
    /// Every candidate is tried even after a rejection, so one bad file
    /// does not block the rest of the batch. Returns the rejections in
    /// the order they occurred.
    pub fn add_candidates<I>(&mut self, batch: I) -> Vec<StagingError>
    where
        I: IntoIterator<Item = (FileMeta, H)>,
    {
        batch
            .into_iter()
            .filter_map(|(meta, handle)| self.add_candidate(meta, handle).err())
            .collect()
    }

    /// Remove the file at `index`.
    ///
    /// Out-of-bounds indices and calls while submitting are no-ops and
    /// return `None`.
    pub fn remove_candidate(&mut self, index: usize) -> Option<StagedFile<H>> {
        if self.is_submitting() {
            return None;
        }
        let removed = self.list.remove(index)?;
        self.bump();
        Some(removed)
    }

    /// Remove the row a rendered remove control points at.
    ///
    /// Tokens from a render older than the last mutation are refused
    /// and return `None`, so a stale control never hits a shifted row.
    pub fn remove(&mut self, token: RemoveToken) -> Option<StagedFile<H>> {
        if token.revision() != self.revision {
            return None;
        }
        self.remove_candidate(token.index())
    }

    /// Rebuild the visible list from the current contents.
    #[must_use]
    pub fn render(&self) -> RenderedList {
        render::render(&self.list, self.revision)
    }

    /// State of the submit control for the current list.
    #[must_use]
    pub fn submit_button(&self) -> SubmitButton {
        if self.is_submitting() {
            return SubmitButton {
                enabled: false,
                busy: true,
                label: "Analyzing...".to_owned(),
            };
        }
        let label = match self.list.len() {
            0 => "Select files to analyze".to_owned(),
            1 => "Analyze 1 file".to_owned(),
            n => format!("Analyze {n} files"),
        };
        SubmitButton {
            enabled: !self.list.is_empty(),
            busy: false,
            label,
        }
    }

    /// Unfreeze the list after the host failed to send a submission.
    ///
    /// The staged files are kept so the user can try again.
    pub fn abort_submission(&mut self) {
        self.phase = Phase::Collecting;
    }

    /// Return the controller to an empty, collecting state.
    ///
    /// Used when the page is shown again after a submission without a
    /// reload (e.g. restored from the back/forward cache).
    pub fn reset(&mut self) {
        self.list.clear();
        self.phase = Phase::Collecting;
        self.bump();
    }

    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<H: Clone> FileStagingController<H> {
    /// Freeze the list and return the handles to submit.
    ///
    /// On success the controller enters [`Phase::Submitting`]: further
    /// additions and removals are ignored and the submit control shows
    /// its in-progress state.
    ///
    /// # Errors
    ///
    /// Returns [`StagingError::EmptySubmission`] when nothing is staged,
    /// or [`StagingError::SubmissionInProgress`] when a submission was
    /// already handed out. Neither changes any state.
    pub fn prepare_submission(&mut self) -> Result<Submission<H>, StagingError> {
        if self.is_submitting() {
            return Err(StagingError::SubmissionInProgress);
        }
        if self.list.is_empty() {
            return Err(StagingError::EmptySubmission);
        }
        self.phase = Phase::Submitting;
        Ok(Submission {
            field_name: FILES_FIELD,
            handles: self.list.iter().map(|f| f.handle().clone()).collect(),
        })
    }
}

impl<H> Default for FileStagingController<H> {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::MIB;

    fn png(name: &str, size: u64) -> FileMeta {
        FileMeta::new(name, size, "image/png")
    }

    #[test]
    fn rejected_candidate_leaves_list_unchanged() {
        let mut controller = FileStagingController::<u32>::default();
        controller.add_candidate(png("a.png", MIB), 1).unwrap();
        let before = controller.files().clone();

        let err = controller.add_candidate(png("big.png", 17 * MIB), 2);
        assert!(matches!(err, Err(StagingError::OversizedFile { .. })));
        assert_eq!(controller.files(), &before);
    }

    #[test]
    fn batch_continues_past_rejections() {
        let mut controller = FileStagingController::<u32>::default();
        let errors = controller.add_candidates([
            (png("a.png", MIB), 1),
            (FileMeta::new("notes.txt", 10, "text/plain"), 2),
            (png("b.png", MIB), 3),
            (png("a.png", MIB), 4),
        ]);
        let kinds: Vec<_> = errors.iter().map(StagingError::kind).collect();
        assert_eq!(kinds, ["unsupported_format", "duplicate_file"]);
        let handles: Vec<_> = controller.files().iter().map(|f| *f.handle()).collect();
        assert_eq!(handles, [1, 3]);
    }

    #[test]
    fn duplicate_within_one_batch_is_rejected() {
        let mut controller = FileStagingController::<u32>::default();
        let errors = controller.add_candidates([(png("a.png", 5), 1), (png("a.png", 5), 2)]);
        assert_eq!(errors.len(), 1);
        assert_eq!(controller.files().len(), 1);
    }

    #[test]
    fn remove_out_of_bounds_is_silent() {
        let mut controller = FileStagingController::<u32>::default();
        controller.add_candidate(png("a.png", 1), 1).unwrap();
        assert!(controller.remove_candidate(3).is_none());
        assert_eq!(controller.files().len(), 1);
    }

    #[test]
    fn remove_by_rendered_token() {
        let mut controller = FileStagingController::<u32>::default();
        assert!(
            controller
                .add_candidates([(png("a.png", 1), 1), (png("b.png", 2), 2)])
                .is_empty()
        );
        let token = controller.render().rows[1].remove;
        let removed = controller.remove(token).unwrap();
        assert_eq!(removed.name(), "b.png");
        assert_eq!(controller.render().rows.len(), 1);
    }

    #[test]
    fn stale_token_is_refused() {
        let mut controller = FileStagingController::<u32>::default();
        let errors = controller.add_candidates([
            (png("a.png", 1), 1),
            (png("b.png", 1), 2),
            (png("c.png", 1), 3),
        ]);
        assert!(errors.is_empty());

        let rows = controller.render().rows;
        let (first, second) = (rows[0].remove, rows[1].remove);
        assert_eq!(controller.remove(first).unwrap().name(), "a.png");

        // `second` still points at index 1, which now holds c.png.
        assert!(controller.remove(second).is_none());
        let names: Vec<_> = controller.files().iter().map(StagedFile::name).collect();
        assert_eq!(names, ["b.png", "c.png"]);

        let fresh = controller.render().rows[0].remove;
        assert_eq!(controller.remove(fresh).unwrap().name(), "b.png");
    }

    #[test]
    fn rejected_candidate_keeps_tokens_valid() {
        let mut controller = FileStagingController::<u32>::default();
        controller.add_candidate(png("a.png", 1), 1).unwrap();
        let token = controller.render().rows[0].remove;

        assert!(controller.add_candidate(png("a.png", 1), 2).is_err());
        assert!(controller.remove(token).is_some());
    }

    #[test]
    fn reset_invalidates_tokens() {
        let mut controller = FileStagingController::<u32>::default();
        controller.add_candidate(png("a.png", 1), 1).unwrap();
        let token = controller.render().rows[0].remove;
        controller.reset();
        controller.add_candidate(png("b.png", 1), 2).unwrap();
        assert!(controller.remove(token).is_none());
        assert_eq!(controller.files().len(), 1);
    }

    #[test]
    fn submit_button_tracks_count() {
        let mut controller = FileStagingController::<u32>::default();
        let empty = controller.submit_button();
        assert!(!empty.enabled);
        assert!(!empty.busy);
        assert_eq!(empty.label, "Select files to analyze");

        controller.add_candidate(png("a.png", 1), 1).unwrap();
        assert_eq!(controller.submit_button().label, "Analyze 1 file");
        assert!(controller.submit_button().enabled);

        controller.add_candidate(png("b.png", 1), 2).unwrap();
        assert_eq!(controller.submit_button().label, "Analyze 2 files");
    }

    #[test]
    fn empty_submission_is_blocked_without_state_change() {
        let mut controller = FileStagingController::<u32>::default();
        assert_eq!(
            controller.prepare_submission(),
            Err(StagingError::EmptySubmission)
        );
        assert_eq!(controller.phase(), Phase::Collecting);
    }

    #[test]
    fn submission_preserves_order_and_field_name() {
        let mut controller = FileStagingController::<u32>::default();
        let errors = controller.add_candidates([
            (png("a.png", 1), 10),
            (png("b.png", 1), 20),
            (png("c.png", 1), 30),
        ]);
        assert!(errors.is_empty());
        let submission = controller.prepare_submission().unwrap();
        assert_eq!(submission.field_name, "files");
        assert_eq!(submission.handles, [10, 20, 30]);
        assert_eq!(submission.len(), 3);
    }

    #[test]
    fn submitting_freezes_the_list() {
        let mut controller = FileStagingController::<u32>::default();
        controller.add_candidate(png("a.png", 1), 1).unwrap();
        controller.prepare_submission().unwrap();

        assert_eq!(
            controller.add_candidate(png("b.png", 1), 2),
            Err(StagingError::SubmissionInProgress)
        );
        let errors = controller.add_candidates([(png("c.png", 1), 3)]);
        assert_eq!(errors, [StagingError::SubmissionInProgress]);
        assert!(controller.remove_candidate(0).is_none());
        assert_eq!(controller.files().len(), 1);

        let button = controller.submit_button();
        assert!(!button.enabled);
        assert!(button.busy);

        assert_eq!(
            controller.prepare_submission(),
            Err(StagingError::SubmissionInProgress)
        );
    }

    #[test]
    fn aborted_submission_keeps_files() {
        let mut controller = FileStagingController::<u32>::default();
        controller.add_candidate(png("a.png", 1), 1).unwrap();
        controller.prepare_submission().unwrap();
        controller.abort_submission();
        assert_eq!(controller.phase(), Phase::Collecting);
        assert_eq!(controller.submit_button().label, "Analyze 1 file");
        assert_eq!(controller.prepare_submission().unwrap().handles, [1]);
    }

    #[test]
    fn reset_returns_to_collecting() {
        let mut controller = FileStagingController::<u32>::default();
        controller.add_candidate(png("a.png", 1), 1).unwrap();
        controller.prepare_submission().unwrap();
        controller.reset();
        assert_eq!(controller.phase(), Phase::Collecting);
        assert!(controller.files().is_empty());
        assert!(!controller.render().visible);
    }
}
