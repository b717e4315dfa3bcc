//! State shared between executors
//!
//! Every task reaches the welder state through this one static. The
//! sequencer runs on a higher-priority interrupt executor, so the panel
//! uses a critical-section mutex.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use spotweld_core::Panel;

/// Parameters, UI focus, status and the pending arm request
pub static PANEL: Panel<CriticalSectionRawMutex> = Panel::new();
