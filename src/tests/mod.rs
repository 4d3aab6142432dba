// Test modules for esim-partner-e2e
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on behaviour verification.
// HTTP-level tests against mock servers live in the crate's tests/ directory.

// Test helper utilities
pub mod helpers;

pub mod locator;
