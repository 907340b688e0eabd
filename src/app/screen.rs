// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration derived from the current stage.

/// Screens the user moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Acquisition,
    Results,
}
