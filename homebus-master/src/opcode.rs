//! The fixed set of TMCL opcodes the gateway understands.

/// TMCL instruction numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    /// Rotate right.
    Ror = 1,
    /// Rotate left.
    Rol = 2,
    /// Motor stop.
    Mst = 3,
    /// Move to position.
    Mvp = 4,
    /// Set axis parameter.
    Sap = 5,
    /// Get axis parameter.
    Gap = 6,
    /// Reference search.
    Rfs = 13,
    /// Get input/output.
    Gio = 15,
    GetVersion = 136,
}

/// Commands answered by the gateway itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LocalHandler {
    GetVersion,
}

/// Where a command is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Pass to the Homebus slave unchanged.
    Forward,
    Local(LocalHandler),
}

pub const OPCODE_TABLE: [(Opcode, Route); 9] = [
    (Opcode::Ror, Route::Forward),
    (Opcode::Rol, Route::Forward),
    (Opcode::Mst, Route::Forward),
    (Opcode::Mvp, Route::Forward),
    (Opcode::Sap, Route::Forward),
    (Opcode::Gap, Route::Forward),
    (Opcode::Gio, Route::Forward),
    (Opcode::Rfs, Route::Forward),
    (Opcode::GetVersion, Route::Local(LocalHandler::GetVersion)),
];

impl Opcode {
    pub fn from_u8(opcode: u8) -> Option<Self> {
        OPCODE_TABLE
            .iter()
            .map(|(known, _)| *known)
            .find(|known| *known as u8 == opcode)
    }
}

impl From<Opcode> for u8 {
    #[inline]
    fn from(value: Opcode) -> Self {
        value as u8
    }
}

/// Look up how a raw opcode is handled.
///
/// `None` means the opcode is not supported.
pub fn route(opcode: u8) -> Option<Route> {
    OPCODE_TABLE
        .iter()
        .find(|(known, _)| *known as u8 == opcode)
        .map(|(_, route)| *route)
}
