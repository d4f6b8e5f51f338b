use leptos::prelude::*;

/// UI state of the console frame, shared by the header and the sidebar.
#[derive(Clone, Copy)]
pub struct LayoutContext {
    pub sidebar_open: RwSignal<bool>,
}

impl LayoutContext {
    pub fn new() -> Self {
        Self {
            sidebar_open: RwSignal::new(true),
        }
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|val| *val = !*val);
    }
}

pub fn use_layout() -> LayoutContext {
    use_context::<LayoutContext>().expect("LayoutContext not provided by ConsoleLayout")
}
