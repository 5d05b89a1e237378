#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Holds at most one live notification together with the handle of its
/// dismissal timer. Replacing the notification drops the old handle.
pub struct Banner<H> {
    next_id: u64,
    live: Option<(Notification, H)>,
}

impl<H> Default for Banner<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            live: None,
        }
    }
}

impl<H> Banner<H> {
    /// Replace whatever is showing. `schedule_dismiss` receives the new id and
    /// returns the timer handle that will dismiss it.
    pub fn show(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        schedule_dismiss: impl FnOnce(NotificationId) -> H,
    ) -> &Notification {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        self.live = None;
        let handle = schedule_dismiss(id);
        let notification = Notification {
            id,
            kind,
            message: message.into(),
        };
        &self.live.insert((notification, handle)).0
    }

    /// Clear the banner if `id` is still the one showing.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match &self.live {
            Some((current, _)) if current.id == id => {
                self.live = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.live = None;
    }

    #[cfg(test)]
    fn current(&self) -> Option<&Notification> {
        self.live.as_ref().map(|(notification, _)| notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountedHandle(Rc<Cell<usize>>);

    impl CountedHandle {
        fn new(live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self(live.clone())
        }
    }

    impl Drop for CountedHandle {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn show_replaces_instead_of_queueing() {
        let live = Rc::new(Cell::new(0));
        let mut banner = Banner::default();

        let first = banner
            .show(NotificationKind::Info, "first", |_| CountedHandle::new(&live))
            .id;
        let second = banner
            .show(NotificationKind::Error, "second", |_| CountedHandle::new(&live))
            .id;

        assert_ne!(first, second);
        assert_eq!(live.get(), 1);
        let current = banner.current().expect("banner showing");
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, NotificationKind::Error);
    }

    #[test]
    fn stale_dismiss_is_ignored() {
        let mut banner: Banner<()> = Banner::default();
        let first = banner.show(NotificationKind::Info, "first", |_| ()).id;
        let second = banner.show(NotificationKind::Info, "second", |_| ()).id;

        assert!(!banner.dismiss(first));
        assert!(banner.current().is_some());
        assert!(banner.dismiss(second));
        assert!(banner.current().is_none());
        assert!(!banner.dismiss(second));
    }

    #[test]
    fn clear_drops_the_dismiss_handle() {
        let live = Rc::new(Cell::new(0));
        let mut banner = Banner::default();
        banner.show(NotificationKind::Info, "bye", |_| CountedHandle::new(&live));
        banner.clear();
        assert_eq!(live.get(), 0);
        assert!(banner.current().is_none());
    }
}
