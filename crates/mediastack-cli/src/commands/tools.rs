use anyhow::Result;

use crate::output::print_json;

/// Print the tool table with input schemas, as `tools/list` reports it.
pub fn run() -> Result<()> {
    print_json(&mediastack_mcp::tools::list_tools())
}
