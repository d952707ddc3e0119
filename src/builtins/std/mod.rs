//! Process-wide state that needs `std`.

mod offset;

pub(crate) use offset::offset_identifier;
