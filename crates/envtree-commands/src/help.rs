use std::{io, io::Write as _};

use anstream::stream::{AsLockedWrite, RawStream};
use anstyle::{AnsiColor, Color, Style};
use envtree::{FieldTree, required::RequiredExpr, tree::LeafRef};

use crate::{CONFIG_PATH, Printer};

const INDENT: &str = "  ";
const DIMMED: Style = Style::new().dimmed();
const FIELD: Style = Style::new().underline();
const REQUIRED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
const ALLOWED_VAL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

impl<W: RawStream + AsLockedWrite> Printer<W> {
    /// Prints help on params in the provided `tree`. Params can be filtered by the supplied predicate.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub fn print_help(
        self,
        tree: &FieldTree,
        mut filter: impl FnMut(&LeafRef<'_>) -> bool,
    ) -> io::Result<()> {
        let mut writer = self.writer;
        let config_name = tree.ty().name_in_code();
        for leaf_ref in tree.leaves().iter().filter(|&leaf_ref| filter(leaf_ref)) {
            write_help(&mut writer, config_name, leaf_ref)?;
            writeln!(&mut writer)?;
        }
        Ok(())
    }
}

fn write_help(
    writer: &mut impl io::Write,
    config_name: &str,
    leaf_ref: &LeafRef<'_>,
) -> io::Result<()> {
    let LeafRef { path, field, leaf, .. } = leaf_ref;
    writeln!(
        writer,
        "{CONFIG_PATH}{key}{CONFIG_PATH:#} {DIMMED}[Rust: {config_name}.{path}]{DIMMED:#}",
        key = leaf.key
    )?;
    writeln!(
        writer,
        "{INDENT}{FIELD}Type{FIELD:#}: {kind} {DIMMED}[Rust: {ty}]{DIMMED:#}",
        kind = leaf.param_kind,
        ty = leaf.rust_type
    )?;

    let required = required_description(leaf_ref);
    if required.is_empty() {
        writeln!(writer, "{INDENT}{FIELD}Required{FIELD:#}: no")?;
    } else {
        writeln!(
            writer,
            "{INDENT}{FIELD}Required{FIELD:#}: {REQUIRED}{required}{REQUIRED:#}"
        )?;
    }

    if !leaf.allowed.is_unrestricted() {
        write!(writer, "{INDENT}{FIELD}Allowed{FIELD:#}: ")?;
        for (i, value) in leaf.allowed.iter().enumerate() {
            if i > 0 {
                write!(writer, ", ")?;
            }
            write!(writer, "{ALLOWED_VAL}{value:?}{ALLOWED_VAL:#}")?;
        }
        writeln!(writer)?;
    }

    for line in field.help.lines() {
        writeln!(writer, "{INDENT}{line}")?;
    }
    Ok(())
}

/// Combines the param's own required expression with expressions of the enclosing configs.
/// Returns an empty string if the param is never required.
fn required_description(leaf_ref: &LeafRef<'_>) -> String {
    let own = [("", leaf_ref.field.required)];
    let inherited = leaf_ref
        .group_requirements
        .iter()
        .map(|&expr| (" (enclosing config)", expr));

    let mut conditions = vec![];
    for (origin, expr) in own.into_iter().chain(inherited) {
        match expr {
            RequiredExpr::Never => { /* doesn't contribute */ }
            RequiredExpr::Always => return format!("yes{origin}"),
            RequiredExpr::Conditional { key, value } => {
                conditions.push(format!("if {key}={value}{origin}"));
            }
        }
    }
    conditions.join(", or ")
}
