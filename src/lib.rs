// SPDX-License-Identifier: PMPL-1.0-or-later

//! Dragnet — case runner for operations against criminal organizations.
//!
//! A case is a directory of organization files and a directory of flyers.
//! Each flyer hides a nickname behind a positional cipher; dragnet decodes
//! it, finds the member answering to it, and arrests them together with a
//! cascade through their underlings.
//!
//! PIPELINE:
//! 1. **Organization**: parse hierarchy files into owned member trees.
//! 2. **Cipher**: digit root of the flyer header picks the organization,
//!    its leader key picks the word position.
//! 3. **Arrest**: first match across organizations, then a greedy descent
//!    down the widest branch.
//! 4. **Report**: captain, arrest total, and dissolution status.

pub mod arrest;
pub mod cipher;
pub mod config;
pub mod department;
pub mod error;
pub mod organization;
pub mod report;
pub mod storage;
pub mod types;
