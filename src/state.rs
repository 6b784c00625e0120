use crate::error::{MountError, MountResult};
use crate::motion::{HOME_PAGE_CLASS, SHAPE_CONTAINER_SELECTOR};

/// Process-wide UI state shared by the behaviors. The DOM mirrors it; it is
/// never read back from class lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    keyboard_navigation: bool,
    ripple_styles_injected: bool,
    shapes_generated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassChange {
    Add,
    Remove,
    Keep,
}

impl PageState {
    #[cfg(test)]
    pub fn keyboard_navigation(&self) -> bool {
        self.keyboard_navigation
    }

    pub fn on_key_down(&mut self, key: &str) -> ClassChange {
        if key != "Tab" {
            return ClassChange::Keep;
        }

        self.keyboard_navigation = true;
        ClassChange::Add
    }

    pub fn on_pointer_down(&mut self) -> ClassChange {
        self.keyboard_navigation = false;
        ClassChange::Remove
    }

    /// Runs `inject` unless the keyframes are already on the page. The guard
    /// is only set once a node is known to exist, so a failed injection is
    /// retried on the next ripple.
    pub fn ensure_ripple_styles<P, F>(&mut self, already_present: P, inject: F) -> MountResult<()>
    where
        P: FnOnce() -> bool,
        F: FnOnce() -> MountResult<()>,
    {
        if self.ripple_styles_injected {
            return Ok(());
        }
        if !already_present() {
            inject()?;
        }

        self.ripple_styles_injected = true;
        Ok(())
    }

    /// Number of decorative shapes to add. Only a flagged home page with a
    /// container gets any, and only on the first call.
    pub fn claim_shapes(
        &mut self,
        is_home: bool,
        has_container: bool,
        configured: usize,
    ) -> MountResult<usize> {
        if !is_home {
            return Err(MountError::PageNotFlagged(HOME_PAGE_CLASS));
        }
        if !has_container {
            return Err(MountError::MissingElement(SHAPE_CONTAINER_SELECTOR));
        }
        if std::mem::replace(&mut self.shapes_generated, true) {
            return Err(MountError::AlreadyMounted("dynamic_shapes"));
        }

        Ok(configured)
    }
}
