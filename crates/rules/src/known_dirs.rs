//! Well-known directory names used by the gitignore directory heuristic.
//!
//! Several tool, VCS, and cache directories have names that superficially
//! look like file extensions (`.git`, `.venv`, `.cache`). The weak hint in
//! [`GitignoreRule`](crate::GitignoreRule) consults this table so such
//! queries are still treated as directories.

/// Names that are conventionally directories even though they contain a dot.
pub const ALWAYS_DIR_NAMES: &[&str] = &[
    ".git",
    ".github",
    ".gitlab",
    ".hg",
    ".svn",
    ".bzr",
    ".cache",
    ".config",
    ".vscode",
    ".idea",
    ".vs",
    ".eclipse",
    ".settings",
    ".metadata",
    ".pytest_cache",
    ".ipynb_checkpoints",
    ".tox",
    ".mypy_cache",
    ".ruff_cache",
    ".docker",
    ".kube",
    ".local",
    ".ssh",
    ".gnupg",
    ".aws",
    ".azure",
    ".gcloud",
    ".cargo",
    ".npm",
    ".yarn",
    ".pnpm",
    ".gradle",
    ".m2",
    ".nuget",
    ".bundle",
    ".rbenv",
    ".nvm",
    ".pyenv",
    ".venv",
    ".virtualenv",
    ".env",
    ".next",
    ".nuxt",
    ".angular",
    ".svelte-kit",
    ".parcel-cache",
    ".webpack",
    ".storybook",
    ".cypress",
    ".terraform",
    ".ansible",
    ".helm",
    ".circleci",
    ".husky",
    ".history",
    ".tmp",
    ".temp",
    ".logs",
    ".backup",
    ".old",
    ".archive",
    ".dist",
    ".build",
    ".out",
    ".output",
    ".static",
    ".assets",
    ".fonts",
    ".icons",
    ".thumbnails",
    ".locales",
    ".i18n",
];

/// Returns `true` if `query` ends with one of the well-known directory names.
#[must_use]
pub fn is_well_known_dir(query: &str) -> bool {
    ALWAYS_DIR_NAMES.iter().any(|name| query.ends_with(name))
}
