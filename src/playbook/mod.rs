// SPDX-License-Identifier: MIT

pub mod loader;
pub mod types;

pub use loader::RunLoader;
pub use types::{Checklist, ChecklistItem, ItemStatus, Playbook, Run};
