//! String interpolation.
//!
//! Double-quoted strings are scanned left to right. At each position the
//! first matching rule applies:
//!
//! 1. `${name}` or `$name`: variable reference, replaced by its string form
//! 2. `\` + char: escape (`\n` `\t` `\s` `\\` `\$`); anything else is kept
//!    as written and reported as a warning
//! 3. `\` + line break: removed (a lone `\` at the end is an error)
//! 4. `$` not starting a reference: kept
//! 5. a run of text without `\` or `$`: copied
//!
//! A name is one or more `[A-Za-z0-9_]+` segments joined by `::`, with an
//! optional leading `::` for top-scope references.

use kestrel_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, SourceLocation};

use crate::{Catalog, LookupMode, Scope, ScopeError, ScopeResult};

/// Resolve an escape character. `None` for unrecognised escapes.
#[inline]
fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        's' => Some(' '),
        '\\' => Some('\\'),
        '$' => Some('$'),
        _ => None,
    }
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte length of the variable name at the start of `s`, or 0 if none.
///
/// A trailing `::` that is not followed by another segment is not part of
/// the name.
fn scan_name(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = if s.starts_with("::") { 2 } else { 0 };
    let mut end = 0;
    loop {
        let segment = bytes[i..].iter().take_while(|b| is_name_byte(**b)).count();
        if segment == 0 {
            break;
        }
        i += segment;
        end = i;
        if bytes[i..].starts_with(b"::") {
            i += 2;
        } else {
            break;
        }
    }
    end
}

/// Scanner state for one string.
struct Interpolator<'a, C: ?Sized> {
    scope: &'a Scope,
    catalog: &'a C,
    text: &'a str,
    location: &'a SourceLocation,
    sink: &'a dyn DiagnosticSink,
    pos: usize,
    out: String,
}

impl<'a, C> Interpolator<'a, C>
where
    C: Catalog + ?Sized,
{
    fn run(mut self) -> ScopeResult<String> {
        while self.pos < self.text.len() {
            let start = self.pos;
            match self.text.as_bytes()[self.pos] {
                b'$' => self.dollar()?,
                b'\\' => self.backslash(),
                _ => self.literal_run(),
            }
            if self.pos == start {
                return Err(ScopeError::StringParse {
                    text: self.text.to_string(),
                    location: self.location.clone(),
                });
            }
        }
        Ok(self.out)
    }

    fn dollar(&mut self) -> ScopeResult<()> {
        let rest = &self.text[self.pos + 1..];

        if let Some(braced) = rest.strip_prefix('{') {
            let len = scan_name(braced);
            if len > 0 && braced.as_bytes().get(len) == Some(&b'}') {
                self.variable(&braced[..len])?;
                self.pos += len + 3;
                return Ok(());
            }
        }

        let len = scan_name(rest);
        if len > 0 {
            self.variable(&rest[..len])?;
            self.pos += len + 1;
        } else {
            self.out.push('$');
            self.pos += 1;
        }
        Ok(())
    }

    fn variable(&mut self, name: &str) -> ScopeResult<()> {
        let value = self
            .scope
            .lookup(self.catalog, name, LookupMode::AsString)?;
        if let Some(value) = value.into_value() {
            value.write_interpolated(&mut self.out);
        }
        Ok(())
    }

    fn backslash(&mut self) {
        let rest = &self.text[self.pos + 1..];
        match rest.chars().next() {
            // A lone trailing backslash matches no rule; leave the cursor so
            // the scan fails.
            None => {}
            // Line continuation.
            Some('\n') => self.pos += 2,
            Some('\r') if rest[1..].starts_with('\n') => self.pos += 3,
            Some(c) => {
                if let Some(resolved) = resolve_escape(c) {
                    self.out.push(resolved);
                } else {
                    self.sink.emit(
                        Diagnostic::warning(ErrorCode::W3001)
                            .with_message(format!("unrecognised escape sequence `\\{c}`"))
                            .with_location(self.location.clone())
                            .with_note("the sequence is kept as written"),
                    );
                    self.out.push('\\');
                    self.out.push(c);
                }
                self.pos += 1 + c.len_utf8();
            }
        }
    }

    fn literal_run(&mut self) {
        let rest = &self.text[self.pos..];
        let len = rest.find(['\\', '$']).unwrap_or(rest.len());
        self.out.push_str(&rest[..len]);
        self.pos += len;
    }
}

impl Scope {
    /// Interpolate a string literal evaluated in this scope.
    ///
    /// Unset variables become empty strings. Unrecognised escapes are
    /// reported to `sink` and kept. Errors from qualified references
    /// (unknown or unevaluated class) are fatal, as is a lone trailing `\`.
    #[tracing::instrument(level = "trace", skip(self, catalog, sink), fields(scope = %self.id))]
    pub fn interpolate<C>(
        &self,
        catalog: &C,
        text: &str,
        location: &SourceLocation,
        sink: &dyn DiagnosticSink,
    ) -> ScopeResult<String>
    where
        C: Catalog + ?Sized,
    {
        Interpolator {
            scope: self,
            catalog,
            text,
            location,
            sink,
            pos: 0,
            out: String::with_capacity(text.len()),
        }
        .run()
    }
}
