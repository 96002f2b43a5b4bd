use std::fmt;
use std::io::{self, Write};

use docopt::Docopt;
use serde::Deserialize;

use stree::{NodeId, SuffixArray, SuffixTree};

static USAGE: &str = "
Usage:
    stree [ --dot ] [ <text> ]
    stree -h | --help

Options:
    -d, --dot     Write the suffix tree in GraphViz dot format instead of
                  printing the suffix array.
    -h, --help    Show this usage message.
";

#[derive(Deserialize)]
struct Args {
    arg_text: String,
    flag_dot: bool,
}

type CliResult<T> = Result<T, Error>;

enum Error {
    Io(io::Error),
    Text(stree::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<stree::Error> for Error {
    fn from(err: stree::Error) -> Error {
        Error::Text(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::Text(ref err) => err.fmt(f),
        }
    }
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    if let Err(err) = args.run() {
        writeln!(&mut io::stderr(), "{}", err).unwrap();
        ::std::process::exit(1);
    }
}

impl Args {
    fn run(&self) -> CliResult<()> {
        if self.flag_dot {
            print_dot_tree(&SuffixTree::new(&self.arg_text)?);
        } else {
            print_array(&SuffixArray::new(&self.arg_text)?);
        }
        Ok(())
    }
}

fn print_array(sa: &SuffixArray) {
    for (rank, &sufstart) in sa.table().iter().enumerate() {
        println!("suffix[{}] {}, {}", rank, sufstart, sa.suffix(rank));
    }
}

fn print_dot_tree(st: &SuffixTree) {
    println!("digraph tree {{");
    println!("label=<<FONT POINT-SIZE=\"20\">{}</FONT>>;", st.text());
    println!("labelloc=\"t\";");
    println!("labeljust=\"l\";");
    let mut id = 0;
    print_dot_node(st, st.root(), 0, &mut id);
    println!("}}");
}

fn print_dot_node(st: &SuffixTree, node: NodeId, node_id: u32, next: &mut u32) {
    println!("{} [label=\"\"]", node_id);
    for edge in st.children(node) {
        *next += 1;
        let child_id = *next;
        match edge.target() {
            Some(child) => {
                println!("{} -> {} [label=\"{}\"];", node_id, child_id, edge.label());
                print_dot_node(st, child, child_id, next);
            }
            None => {
                let sufi = edge.suffix_id().expect("leaf edge has a suffix id");
                println!("{} [label=\"{}\", shape=box]", child_id, sufi);
                println!("{} -> {} [label=\"{}\"];", node_id, child_id, edge.label());
            }
        }
    }
}
