//! ghsecret - a CloudFormation custom resource provider for GitHub Actions secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── handle        # Handle one lifecycle event
//! │   ├── validate      # Decode and check resource properties
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # ghsecret.toml management
//!     ├── domain/       # Events, requests, repositories
//!     ├── validation    # Property bag decoding
//!     ├── store/        # Secret and parameter stores (AWS)
//!     ├── github/       # GitHub API client, token and key retrieval
//!     ├── resolve       # Plaintext resolution
//!     ├── prepare       # Concurrent credential/key + value lookup
//!     ├── cipher/       # Sealed-box encryption
//!     ├── deliver       # Seal and upsert
//!     ├── lifecycle     # Create/Update/Delete dispatch
//!     └── response      # CloudFormation response documents
//! ```
//!
//! # Pipeline
//!
//! ```text
//! event -> decode_props -> prepare ─┬─ token -> client -> public key ─┬─ seal -> PUT secret
//!                                   └─ secret value ─────────────────┘
//! ```

pub mod cli;
pub mod core;
pub mod error;
