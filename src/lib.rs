//! Workspace-level integration tests for fibdrv live under `tests/`.
