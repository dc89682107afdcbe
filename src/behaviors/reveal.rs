use super::*;

/// Fades sections in the first time they scroll into view.
#[derive(Debug, Clone)]
pub(crate) struct SectionReveal {
    sections: Vec<NodeId>,
    class_name: String,
}

impl SectionReveal {
    pub(crate) fn new(sections: &[NodeId], class_name: &str) -> Self {
        Self {
            sections: sections.to_vec(),
            class_name: class_name.to_string(),
        }
    }

    pub(crate) fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    /// One-shot: the marker stays and the section is no longer observed.
    pub(crate) fn reveal(&self, section: NodeId, cx: &mut Context<'_>) -> Result<()> {
        cx.dom.class_add(section, &self.class_name)?;
        cx.observers.unobserve(ObserverOwner::SectionReveal, section);
        tracing::debug!(section = ?cx.dom.attr(section, "id"), "section revealed");
        Ok(())
    }
}
