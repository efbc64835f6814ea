//! Fills a form in a running desktop application.
//!
//! Expects an application whose window exposes a text box with automation id
//! `NameBox` and a results grid with automation id `ResultsGrid` (any WPF
//! test app with a DataGrid works). Run with:
//!
//! ```sh
//! cargo run --example fill_form
//! ```

use quaestor::{DataGrid, Session, TextBox};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let session = Session::new()?;
    let root = session.root()?;

    let name = TextBox::new(&session, &root, "NameBox")?;
    if name.is_read_only()? {
        anyhow::bail!("NameBox is read-only, nothing to do");
    }
    name.set_text("Ada Lovelace")?;
    info!(text = %name.text()?, "text box updated");

    let grid = DataGrid::new(&session, &root, "ResultsGrid")?;
    info!(
        rows = grid.row_count()?,
        columns = grid.column_count()?,
        "found results grid"
    );

    grid.scroll_to(30, 2)?;
    let cell: TextBox = grid.item(30, 2)?;
    info!(value = %cell.text()?, "cell content at [30, 2]");

    Ok(())
}
