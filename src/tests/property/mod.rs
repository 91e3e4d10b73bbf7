//! Property-based tests for the character chat panel
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `message_list_props`: row building and rendering of the message list
//!   - Sample messages never produce a row or any rendered text
//!   - Only the last message can be loading, and only while sending
//!   - Marker-wrapped player input renders without its label
//!
//! - `mode_props`: mode toggle transitions
//!   - Perspective returns to its start after three presses
//!   - Each toggle leaves the other modes untouched
//!   - Every reachable state survives a JSON round trip
//!
//! - `input_props`: draft editing and line wrapping
//!   - Arbitrary edit sequences keep the cursor on a char boundary
//!   - Wrapped lines never exceed the target width
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod input_props;
mod message_list_props;
mod mode_props;
