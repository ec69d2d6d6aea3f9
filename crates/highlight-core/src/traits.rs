use crate::hit::BoxedHitEnum;

/// Weight source for matched terms, built once per query and shared read-only.
pub trait QueryWeigher: Send + Sync {
    fn weight(&self, term: &str) -> f32;
}

/// One field of one document as the host sees it.
pub trait FieldSource {
    fn name(&self) -> &str;

    /// The text hits index into, `None` when the field has no value.
    fn text(&self) -> Option<&str>;

    /// Offset-ordered hits for this field weighted by `weigher`.
    fn hits<'s>(&'s self, weigher: &'s dyn QueryWeigher) -> anyhow::Result<BoxedHitEnum<'s>>;

    /// Releases whatever the host opened for this field.
    fn cleanup(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Opens the other fields of the same document for matched-field highlighting.
pub trait FieldLoader {
    fn load(&self, field: &str) -> anyhow::Result<Box<dyn FieldSource + '_>>;
}
