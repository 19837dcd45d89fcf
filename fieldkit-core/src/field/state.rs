use bitflags::bitflags;

bitflags! {
    /// Visual state of a field.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct FieldState: u8 {
        /// Value is not empty.
        const HAS_VALUE  = 0b0001;
        /// Transient error highlight, clears itself after a short delay.
        const ERROR      = 0b0010;
        /// An error message is shown until the field is focused again.
        const MESSAGE    = 0b0100;
        const POP_ACTIVE = 0b1000;
    }
}
