//! Options to control how files are parsed

/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`].
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// This mode will eagerly error on any non-spec-compliant input.
	///
	/// ## Examples of behavior
	///
	/// * A tag declares more data than the file holds - The extraction errors and no picture is
	///   returned
	/// * An unsupported ID3v2 version is encountered - The extraction errors
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// This mode treats recoverable malformations as a normal "no picture" outcome.
	///
	/// ## Examples of behavior
	///
	/// * A tag declares more data than the file holds - The extraction logs a warning and reports
	///   that no picture is present
	/// * An unsupported ID3v2 version is encountered - The extraction reports that no picture is
	///   present
	#[default]
	BestAttempt,
	/// Least eager to error
	///
	/// This mode ignores the majority of non-fatal errors, and otherwise behaves like
	/// [`ParsingMode::BestAttempt`].
	Relaxed,
}

/// Options to control how files are parsed
///
/// The allocation ceiling lives here rather than in process-wide state, so two extractions with
/// different limits can run side by side.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) allocation_limit: usize,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	allocation_limit: ParseOptions::DEFAULT_ALLOCATION_LIMIT,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Default maximum size of a single allocation, 16 MB
	///
	/// Picture payloads are allocated from untrusted length fields, this bounds them.
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// The maximum number of bytes a single declared payload may allocate
	///
	/// # Examples
	///
	/// ```rust
	/// use coverart::config::ParseOptions;
	///
	/// // My art is high resolution, raise the ceiling
	/// let parsing_options =
	/// 	ParseOptions::new().allocation_limit(ParseOptions::DEFAULT_ALLOCATION_LIMIT * 4);
	/// ```
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}
}
