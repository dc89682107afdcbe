use super::*;

const NAME_BANNER: &str = concat!(
    "     _          _               _ _     \n",
    "    / \\   _ __ (_)_ __ _   _  __| | |__  \n",
    "   / _ \\ | '_ \\| | '__| | | |/ _` | '_ \\ \n",
    "  / ___ \\| | | | | |  | |_| | (_| | | | |\n",
    " /_/   \\_\\_| |_|_|_|   \\__,_|\\__,_|_| |_|\n",
);

/// Greeting printed to the developer console when the page script runs.
pub(crate) fn log_banner(console: &mut Console, config: &BehaviorConfig) {
    console.log_styled(
        "👋 Hi there!",
        "font-size: 24px; font-weight: bold; color: #4F46E5;",
    );
    console.log_styled(
        "Looking for a talented backend engineer?",
        "font-size: 16px; color: #06B6D4;",
    );
    console.log_styled(
        format!("Let's connect: {}", config.owner_email),
        "font-size: 14px; color: #10B981;",
    );
    console.log_styled(NAME_BANNER, "color: #4F46E5; font-family: monospace;");
}

pub(crate) fn write_footer_year(
    dom: &mut Dom,
    footer_text: NodeId,
    clock: &dyn Clock,
    config: &BehaviorConfig,
) -> Result<()> {
    let year = clock.current_year();
    dom.set_text_content(
        footer_text,
        &format!("© {year} {}. All rights reserved.", config.owner_name),
    )
}

/// Work done once the document has been parsed.
#[derive(Debug, Clone, Default)]
pub(crate) struct DomReadyTasks {
    timeline_items: Vec<NodeId>,
    preloaded: Vec<NodeId>,
    done: bool,
}

impl DomReadyTasks {
    pub(crate) fn new(timeline_items: &[NodeId]) -> Self {
        Self {
            timeline_items: timeline_items.to_vec(),
            preloaded: Vec::new(),
            done: false,
        }
    }

    pub(crate) fn run(&mut self, cx: &mut Context<'_>) -> Result<()> {
        if self.done {
            return Ok(());
        }
        self.done = true;

        for src in &cx.config.preload_images {
            let img = cx.dom.create_detached_element("img");
            cx.dom.set_attr(img, "src", src)?;
            self.preloaded.push(img);
        }

        let stagger = cx.config.timeline_stagger_s;
        for (index, item) in self.timeline_items.iter().enumerate() {
            let delay = format_float(index as f64 * stagger);
            cx.dom
                .style_set(*item, "animation-delay", &format!("{delay}s"))?;
        }
        Ok(())
    }

    pub(crate) fn preloaded_sources(&self, dom: &Dom) -> Vec<String> {
        self.preloaded
            .iter()
            .filter_map(|img| dom.attr(*img, "src"))
            .collect()
    }
}
