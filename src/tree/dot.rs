//! Graphviz dot export of an induced tree.
//! Internal nodes become ellipses labeled with the tested feature,
//! leaves become filled boxes colored by class label,
//! and every branch becomes one labeled edge.
use std::collections::HashMap;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use super::node::{DecisionTree, Node, Predicate};


/// A pastel 12-color palette ("Set3") used when the target takes
/// more than two classes; colors are assigned in sorted class order.
const PALETTE: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072",
    "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Binary targets get two fixed colors.
const BINARY_COLORS: [&str; 2] = ["lightcoral", "palegreen"];


impl DecisionTree {
    /// Render this tree as a Graphviz dot description.
    /// `classes` holds the distinct class labels of the target column
    /// in sorted order
    /// (see [`Sample::target_domain`](crate::Sample::target_domain));
    /// the leaf colors are keyed by that order.
    pub fn to_dot_string(&self, classes: &[String]) -> String {
        let colors = color_map(classes);

        let mut out = String::from("digraph DecisionTree {\n");
        out.push_str("\tgraph [ splines = false, nodesep = 1.0, ranksep = 1.0 ];\n");
        out.push_str("\tnode [ fontname = \"Helvetica\" ];\n");
        out.push_str("\tedge [ fontname = \"Helvetica\" ];\n");

        let info = to_dot_info(self.root(), 0, &colors).0;
        for row in info {
            out.push_str(&row);
        }

        out.push_str("}\n");
        out
    }


    /// Write the dot description of this tree to `path`.
    pub fn to_dot_file<P>(&self, classes: &[String], path: P)
        -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(self.to_dot_string(classes).as_bytes())?;
        Ok(())
    }
}


/// Map each class label to its fill color.
/// The palette repeats past twelve classes.
fn color_map(classes: &[String]) -> HashMap<&str, &'static str> {
    if classes.len() == 2 {
        classes.iter()
            .map(|c| c.as_str())
            .zip(BINARY_COLORS)
            .collect()
    } else {
        classes.iter()
            .map(|c| c.as_str())
            .zip(PALETTE.into_iter().cycle())
            .collect()
    }
}


fn edge_label(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Equals(v) => v.clone(),
        Predicate::In(set) => set.join(", "),
        Predicate::EqualsNumeric(v) => v.to_string(),
        Predicate::Le(t) => format!("<= {t}"),
        Predicate::Gt(t) => format!("> {t}"),
    }
}


fn to_dot_info(
    node: &Node,
    id: usize,
    colors: &HashMap<&str, &'static str>,
) -> (Vec<String>, usize)
{
    match node {
        Node::Branch(b) => {
            let mut info = vec![format!(
                "\tnode_{id} [ label = \"{feat}\" ];\n",
                feat = b.feature,
            )];

            let mut next_id = id + 1;
            for (predicate, child) in &b.branches {
                let child_id = next_id;
                let (mut c_info, ret_id) =
                    to_dot_info(child, child_id, colors);
                info.append(&mut c_info);
                info.push(format!(
                    "\tnode_{id} -> node_{child_id} [ label = \"{label}\" ];\n",
                    label = edge_label(predicate),
                ));
                next_id = ret_id;
            }

            (info, next_id)
        },
        Node::Leaf(l) => {
            let color = colors.get(l.label.as_str())
                .copied()
                .unwrap_or("white");
            let info = format!(
                "\tnode_{id} [ \
                 label = \"{label}\", \
                 shape = box, \
                 fillcolor = \"{color}\", \
                 style = filled \
                 ];\n",
                label = l.label,
            );

            (vec![info], id + 1)
        },
    }
}
