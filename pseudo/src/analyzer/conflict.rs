use super::context::Analysis;

impl Analysis<'_> {
    /// Pass 3: one warning per cell that several owners claim.
    pub(super) fn detect_conflicts(&mut self) {
        for shared in self.cells.shared() {
            self.warning(
                shared.latest.line,
                0,
                shared.latest.owner.len(),
                format!(
                    "Cell C{} shared between: {}. Ensure this is intentional for space optimization.",
                    shared.cell,
                    shared.owners.join(", ")
                ),
            );
        }
    }
}
