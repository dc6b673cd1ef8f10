/// Readiness directions a descriptor is waited on or reported for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Interest {
    pub(crate) read: bool,
    pub(crate) write: bool,
}

impl Interest {
    pub(crate) const READABLE: Self = Self {
        read: true,
        write: false,
    };

    pub(crate) const WRITABLE: Self = Self {
        read: false,
        write: true,
    };
}
