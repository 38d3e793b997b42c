/**
 * MIT License
 *
 * ytlinks - Copyright (c) 2021 Larry Hao
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
use clap::{builder::ArgPredicate, ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use ytlinkslib::config::OutputFormat;

#[derive(Parser, Debug)]
// mostly read from `Cargo.toml`
#[clap(name = "ytlinks", author, version, about, long_about=None)]
pub struct Args {
    /// The player response to read, read from stdin if not given or "-"
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Output format, default is from the config file
    #[arg(short, long)]
    pub format: Option<Format>,
    /// Print json on a single line
    #[arg(short, long)]
    pub compact: bool,
    /// Use this config file instead of `~/.config/ytlinks/config.toml`
    #[arg(long, value_name = "PATH", env = "YTL_CONFIG")]
    pub config: Option<PathBuf>,
    #[clap(flatten)]
    pub log_options: LogOptions,
}

impl Args {
    /// Get the input file, [`None`] if stdin should be used
    pub fn input_file(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|v| v.as_os_str() != "-")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Plain,
}

impl From<Format> for OutputFormat {
    fn from(val: Format) -> OutputFormat {
        match val {
            Format::Json => OutputFormat::Json,
            Format::Plain => OutputFormat::Plain,
        }
    }
}

const DEFAULT_LOGFILE_FILENAME: &str = "ytlinks.log";

#[derive(Debug, Parser, Clone, PartialEq)]
pub struct LogOptions {
    /// Enable logging to a file,
    /// automatically enabled if "log-file" is manually set
    #[arg(
        long = "log-to-file",
        // automatically enable "log-to-file" if "log-file" is set, unless explicitly told not to
        default_value_if("log_file", ArgPredicate::IsPresent, "true"),
        default_value_t = false,
        // explicit arg action is required, otherwise it will not take any arguments like "=false" to disable file logging
        action = ArgAction::Set
    )]
    pub log_to_file: bool,

    /// Set logging file
    #[arg(long = "log-file", default_value_os_t = default_logfile_path(), env = "YTL_LOGFILE")]
    pub log_file: PathBuf,

    /// Use colored logging for files
    /// Example: live tailing via `tail -f /logfile`
    #[arg(long = "log-filecolor", env = "YTL_LOGFILE_COLOR")]
    pub file_color_log: bool,
}

fn default_logfile_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOGFILE_FILENAME)
}
