//! This module contains the symbols and keywords of the surface language.
//! These constants are used when we prettyprint terms and judgements.

// Symbols
//
//

/// The symbol `->`
pub const ARROW: &str = "->";

/// The symbol `&`, written between the components of an existential quantifier
pub const AMPERSAND: &str = "&";

/// The symbol `,`
pub const COMMA: &str = ",";

/// The symbol `:`
pub const COLON: &str = ":";

/// The symbol `<:`, used for type class bounds
pub const SUBTYPE: &str = "<:";

/// The symbol `;`
pub const SEMICOLON: &str = ";";

/// The symbol `.`
pub const DOT: &str = ".";

/// The symbol `=`
pub const EQUALS: &str = "=";

/// The symbol `\`
pub const BACKSLASH: &str = "\\";

/// The symbol `#`, prefix of a positional projection in core terms
pub const HASH: &str = "#";

/// The symbol `|-`
pub const TURNSTILE: &str = "|-";

/// The placeholder printed for values without a runtime representation
pub const ABSENT: &str = "<type>";

// Keywords
//
//

/// The keyword `Type`
pub const TYPE: &str = "Type";

/// The keyword `let`
pub const LET: &str = "let";

/// The keyword `in`
pub const IN: &str = "in";

/// The keyword `struct`
pub const STRUCT: &str = "struct";

/// The keyword `new`
pub const NEW: &str = "new";

/// The keyword `typeof`
pub const TYPEOF: &str = "typeof";

/// The keyword `import`
pub const IMPORT: &str = "import";

/// The keyword `forall`
pub const FORALL: &str = "forall";

/// The keyword `exists`
pub const EXISTS: &str = "exists";
