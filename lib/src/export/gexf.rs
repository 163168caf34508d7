// lib/src/export/gexf.rs
//
// GEXF 1.2 writer for a snapshot, the hand-off format to Gephi. Node
// attributes carry the first-seen timestamp and the per-kind activity
// counters; edge weight and kind breakdown ride along as attributes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use models::errors::{GraphError, GraphResult};

use crate::engine::snapshot::SnapshotTable;

/// Writes a snapshot table as a GEXF 1.2 document.
pub fn write_gexf<W: Write>(table: &SnapshotTable, mut out: W) -> GraphResult<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">"#
    )?;
    writeln!(
        out,
        r#"  <meta><creator>metoo-net</creator><description>interaction network {} to {}</description></meta>"#,
        table.window.start.to_rfc3339(),
        table.window.end.to_rfc3339()
    )?;
    writeln!(out, r#"  <graph defaultedgetype="directed" mode="static">"#)?;

    writeln!(out, r#"    <attributes class="node">"#)?;
    writeln!(
        out,
        r#"      <attribute id="0" title="first_seen" type="string"/>"#
    )?;
    for (id, title) in [
        (1, "sent_replies"),
        (2, "sent_mentions"),
        (3, "sent_retweets"),
        (4, "received_replies"),
        (5, "received_mentions"),
        (6, "received_retweets"),
    ] {
        writeln!(
            out,
            r#"      <attribute id="{}" title="{}" type="long"/>"#,
            id, title
        )?;
    }
    writeln!(out, r#"    </attributes>"#)?;

    writeln!(out, r#"    <attributes class="edge">"#)?;
    for (id, title) in [(0, "replies"), (1, "mentions"), (2, "retweets")] {
        writeln!(
            out,
            r#"      <attribute id="{}" title="{}" type="long"/>"#,
            id, title
        )?;
    }
    writeln!(out, r#"    </attributes>"#)?;

    writeln!(out, r#"    <nodes>"#)?;
    for node in &table.nodes {
        let id = escape_xml(node.id.as_ref());
        writeln!(out, r#"      <node id="{}" label="{}">"#, id, id)?;
        writeln!(out, r#"        <attvalues>"#)?;
        writeln!(
            out,
            r#"          <attvalue for="0" value="{}"/>"#,
            node.first_seen.to_rfc3339()
        )?;
        for (attr, value) in [
            (1, node.sent.replies),
            (2, node.sent.mentions),
            (3, node.sent.retweets),
            (4, node.received.replies),
            (5, node.received.mentions),
            (6, node.received.retweets),
        ] {
            writeln!(
                out,
                r#"          <attvalue for="{}" value="{}"/>"#,
                attr, value
            )?;
        }
        writeln!(out, r#"        </attvalues>"#)?;
        writeln!(out, r#"      </node>"#)?;
    }
    writeln!(out, r#"    </nodes>"#)?;

    writeln!(out, r#"    <edges>"#)?;
    for (index, row) in table.edges.iter().enumerate() {
        writeln!(
            out,
            r#"      <edge id="{}" source="{}" target="{}" weight="{}">"#,
            index,
            escape_xml(row.source.as_ref()),
            escape_xml(row.target.as_ref()),
            row.edge.weight
        )?;
        writeln!(out, r#"        <attvalues>"#)?;
        for (attr, value) in [
            (0, row.edge.kinds.replies),
            (1, row.edge.kinds.mentions),
            (2, row.edge.kinds.retweets),
        ] {
            writeln!(
                out,
                r#"          <attvalue for="{}" value="{}"/>"#,
                attr, value
            )?;
        }
        writeln!(out, r#"        </attvalues>"#)?;
        writeln!(out, r#"      </edge>"#)?;
    }
    writeln!(out, r#"    </edges>"#)?;

    writeln!(out, r#"  </graph>"#)?;
    writeln!(out, r#"</gexf>"#)?;
    Ok(())
}

/// Writes a snapshot table as a GEXF file at `path`.
pub fn export_gexf(table: &SnapshotTable, path: &Path) -> GraphResult<()> {
    let file = File::create(path)
        .map_err(|err| GraphError::Export(format!("cannot create '{}': {}", path.display(), err)))?;
    write_gexf(table, BufWriter::new(file))
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
