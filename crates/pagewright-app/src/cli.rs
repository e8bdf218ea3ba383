// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pagewright_core::types::{PaperSize, Theme};

#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(version)]
#[command(about = "Convert source files to paginated PDFs and manage the PDF library")]
pub struct Cli {
    /// Log conversion stages and library operations to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory holding config.json and the default library folder
    #[arg(long, global = true, value_name = "DIR", env = "PAGEWRIGHT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a source file to PDF in the library folder
    Convert {
        /// Source file to convert
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared file type, e.g. "Python File (.py)" or "py"
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        file_type: String,
    },

    /// List the PDFs in the library folder
    #[command(alias = "ls")]
    List,

    /// Delete a PDF from the library folder
    #[command(alias = "rm")]
    Delete {
        /// File name of the PDF, e.g. notes.pdf
        name: String,
    },

    /// Point the library at an existing folder
    SetRoot {
        #[arg(value_name = "DIR")]
        path: PathBuf,
    },

    /// Print the current library folder
    Root,

    /// List the supported file types
    Types,

    /// Show details of a PDF in the library
    Info {
        name: String,
    },

    /// Show or change rendering settings
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// Text drawn at the top of every page
    #[arg(long)]
    pub header: Option<String>,

    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    #[arg(long, value_enum)]
    pub paper: Option<PaperArg>,

    /// Body font size in points
    #[arg(long, value_name = "PT")]
    pub font_size: Option<f32>,

    /// TrueType font to embed for the body text
    #[arg(long, value_name = "TTF", conflicts_with = "builtin_font")]
    pub font: Option<PathBuf>,

    /// Go back to the built-in Courier face
    #[arg(long)]
    pub builtin_font: bool,

    /// Indent every line by three spaces
    #[arg(long, value_name = "BOOL")]
    pub indent: Option<bool>,
}

impl ConfigArgs {
    /// True when no setting was given, i.e. the caller only wants to look.
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
            && self.theme.is_none()
            && self.paper.is_none()
            && self.font_size.is_none()
            && self.font.is_none()
            && !self.builtin_font
            && self.indent.is_none()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => PaperSize::A3,
            PaperArg::A4 => PaperSize::A4,
            PaperArg::A5 => PaperSize::A5,
            PaperArg::Letter => PaperSize::Letter,
            PaperArg::Legal => PaperSize::Legal,
        }
    }
}
