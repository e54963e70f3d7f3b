//! Layout PS record schema.
//!
//! A [`Layout`] is an ordered, validated list of [`FieldSpec`]s describing
//! where each field of a 200-byte record lives and how its value is
//! formatted. Positions are 1-based and inclusive, as in the printed
//! layout documentation:
//!
//! ```text
//! pos  1     TIPO_REGISTRO                       Fixed "3"
//! pos  2-12  CPF_AUTONOMO                        Numeric      CPF DO AUTÔNOMO
//! pos 13-16  CODIGO_PLANO_AUTONOMO               AlphaNumeric CÓDIGO PLANO
//! pos 17-24  VALOR_DESCONTO_AUTONOMO             Currency     MENSALIDADE TITULAR
//! pos 25-35  CPF_AUTONOMO_DEPENDENTE             Numeric      CPF DO DEPENDENTE
//! pos 36-39  CODIGO_PLANO_AUTONOMO_DEPENDENTE    AlphaNumeric CÓDIGO PLANO DEPENDENTE
//! pos 40-47  VALOR_DESCONTO_AUTONOMO_DEPENDENTE  Currency     MENSALIDADE DEPENDENTE
//! pos 48-200 (reserved, spaces)
//! ```

use std::fmt;

use crate::error::LayoutError;

/// Width of every Layout PS record line.
pub const TOTAL_LINE_SIZE: usize = 200;

/// Formatting rule applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Constant value, input ignored.
    Fixed,
    /// Digits only, zero-left-padded.
    Numeric,
    /// Implied two-decimal amount written as zero-padded cents.
    Currency,
    /// Trimmed text, space-right-padded.
    AlphaNumeric,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Fixed => "Fixed",
            FieldKind::Numeric => "Numeric",
            FieldKind::Currency => "Currency",
            FieldKind::AlphaNumeric => "AlphaNumeric",
        };
        f.write_str(name)
    }
}

/// Where a field's raw value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    Constant(String),
    Column(String),
}

/// One output field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub width: usize,
    /// 1-based start position within the line.
    pub start: usize,
    pub kind: FieldKind,
    pub source: FieldSource,
}

impl FieldSpec {
    pub fn fixed(name: &str, start: usize, width: usize, value: &str) -> Self {
        Self {
            name: name.to_string(),
            width,
            start,
            kind: FieldKind::Fixed,
            source: FieldSource::Constant(value.to_string()),
        }
    }

    pub fn column(name: &str, start: usize, width: usize, kind: FieldKind, column: &str) -> Self {
        Self {
            name: name.to_string(),
            width,
            start,
            kind,
            source: FieldSource::Column(column.to_string()),
        }
    }

    /// Last position (1-based, inclusive) occupied by this field.
    pub fn end(&self) -> usize {
        self.start + self.width - 1
    }

    /// The input column feeding this field, if any.
    pub fn source_column(&self) -> Option<&str> {
        match &self.source {
            FieldSource::Column(c) => Some(c),
            FieldSource::Constant(_) => None,
        }
    }
}

/// An immutable, validated record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    fields: Vec<FieldSpec>,
    line_size: usize,
}

impl Layout {
    /// Build a layout, checking that fields are ordered, non-overlapping,
    /// fit inside `line_size`, and carry the source their kind requires.
    pub fn new(fields: Vec<FieldSpec>, line_size: usize) -> Result<Self, LayoutError> {
        let mut cursor = 1;
        for field in &fields {
            if field.width == 0 {
                return Err(LayoutError::ZeroWidth(field.name.clone()));
            }
            if field.start == 0 {
                return Err(LayoutError::ZeroStart(field.name.clone()));
            }
            if field.start < cursor {
                return Err(LayoutError::Overlap {
                    field: field.name.clone(),
                    start: field.start,
                    cursor: cursor - 1,
                });
            }
            if field.end() > line_size {
                return Err(LayoutError::PastEnd {
                    field: field.name.clone(),
                    end: field.end(),
                    total: line_size,
                });
            }
            match (&field.kind, &field.source) {
                (FieldKind::Fixed, FieldSource::Column(_)) => {
                    return Err(LayoutError::MissingConstant(field.name.clone()));
                }
                (FieldKind::Fixed, FieldSource::Constant(_)) => {}
                (_, FieldSource::Constant(_)) => {
                    return Err(LayoutError::MissingColumn(field.name.clone()));
                }
                (_, FieldSource::Column(_)) => {}
            }
            cursor = field.start + field.width;
        }
        Ok(Self { fields, line_size })
    }

    /// The Layout PS record, type "3" (self-employed health-plan deduction).
    pub fn ps() -> Result<Self, LayoutError> {
        let fields = vec![
            FieldSpec::fixed("TIPO_REGISTRO", 1, 1, "3"),
            FieldSpec::column("CPF_AUTONOMO", 2, 11, FieldKind::Numeric, "CPF DO AUTÔNOMO"),
            FieldSpec::column(
                "CODIGO_PLANO_AUTONOMO",
                13,
                4,
                FieldKind::AlphaNumeric,
                "CÓDIGO PLANO",
            ),
            FieldSpec::column(
                "VALOR_DESCONTO_AUTONOMO",
                17,
                8,
                FieldKind::Currency,
                "MENSALIDADE TITULAR",
            ),
            FieldSpec::column(
                "CPF_AUTONOMO_DEPENDENTE",
                25,
                11,
                FieldKind::Numeric,
                "CPF DO DEPENDENTE",
            ),
            FieldSpec::column(
                "CODIGO_PLANO_AUTONOMO_DEPENDENTE",
                36,
                4,
                FieldKind::AlphaNumeric,
                "CÓDIGO PLANO DEPENDENTE",
            ),
            FieldSpec::column(
                "VALOR_DESCONTO_AUTONOMO_DEPENDENTE",
                40,
                8,
                FieldKind::Currency,
                "MENSALIDADE DEPENDENTE",
            ),
        ];
        Self::new(fields, TOTAL_LINE_SIZE)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn line_size(&self) -> usize {
        self.line_size
    }

    /// Source columns referenced by the layout, in field order.
    pub fn source_columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(FieldSpec::source_column)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} {:>5} {:<13} {:<36} SOURCE",
            "START", "WIDTH", "KIND", "FIELD"
        )?;
        let mut cursor = 1;
        for field in &self.fields {
            if field.start > cursor {
                writeln!(
                    f,
                    "{:>5} {:>5} {:<13} {:<36} -",
                    cursor,
                    field.start - cursor,
                    "Reserved",
                    "(spaces)"
                )?;
            }
            let source = match &field.source {
                FieldSource::Constant(v) => format!("= {v:?}"),
                FieldSource::Column(c) => c.clone(),
            };
            writeln!(
                f,
                "{:>5} {:>5} {:<13} {:<36} {}",
                field.start,
                field.width,
                field.kind.to_string(),
                field.name,
                source
            )?;
            cursor = field.start + field.width;
        }
        if cursor <= self.line_size {
            writeln!(
                f,
                "{:>5} {:>5} {:<13} {:<36} -",
                cursor,
                self.line_size - cursor + 1,
                "Reserved",
                "(spaces)"
            )?;
        }
        Ok(())
    }
}
