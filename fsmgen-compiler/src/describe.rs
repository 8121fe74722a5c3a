//! Graphviz description of a validated machine.

use crate::validate::Machine;

/// Renders the machine as a DOT digraph.
///
/// States are listed lexicographically. Terminal states become `Msquare`
/// nodes. Events of one state that share a destination are merged into a
/// single edge labelled with the events in lexicographic order; edges appear in
/// the order of their first event.
pub fn describe(machine: &Machine) -> String {
    let mut lines = vec![format!("digraph {} {{", machine.name())];

    for state in machine.states() {
        if state.is_terminal {
            lines.push(format!("\t{} [shape=Msquare];", state.name));
            continue;
        }

        let mut edges: Vec<(String, Vec<String>)> = Vec::new();
        for outgoing in machine.outgoing(&state.name.to_string()) {
            let destination = outgoing.destination.name.to_string();
            let event = outgoing.event.name.to_string();
            match edges.iter_mut().find(|(d, _)| *d == destination) {
                Some((_, events)) => events.push(event),
                None => edges.push((destination, vec![event])),
            }
        }

        lines.extend(edges.into_iter().map(|(destination, events)| {
            format!(
                "\t{} -> {} [label=\"{}\"];",
                state.name,
                destination,
                events.join(", ")
            )
        }));
    }

    lines.push("}".to_owned());
    let mut description = lines.join("\n");
    description.push('\n');
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{ParsePolicy, parse_all};
    use crate::extract::extract;
    use crate::graph::MachineDefinition;
    use crate::source::Introspect;
    use crate::validate::validate;

    fn machine(item: syn::ItemStruct) -> Machine {
        let decl = item.introspect().unwrap();
        let states = parse_all(&extract(&decl).unwrap(), &ParsePolicy::default()).unwrap();
        let name = syn::Ident::new("Cbm", decl.name.span());
        validate(MachineDefinition::build(name, None, states).unwrap()).unwrap()
    }

    #[test]
    fn circuit_breaker_description() {
        let machine = machine(syn::parse_quote! {
            struct CbmDeclaration {
                #[on = r#"Try:"HalfOpened""#]
                Opened: (),
                #[on = r#"Success:"Closed",Failure:"Opened""#]
                HalfOpened: (),
                #[on = r#"Failure:"Opened",Panic:"Terminal",Error:"Terminal""#]
                Closed: (),
                Terminal: (),
            }
        });

        let expected = "digraph Cbm {\n\
            \tClosed -> Terminal [label=\"Error, Panic\"];\n\
            \tClosed -> Opened [label=\"Failure\"];\n\
            \tHalfOpened -> Opened [label=\"Failure\"];\n\
            \tHalfOpened -> Closed [label=\"Success\"];\n\
            \tOpened -> HalfOpened [label=\"Try\"];\n\
            \tTerminal [shape=Msquare];\n\
            }\n";
        assert_eq!(describe(&machine), expected);
    }

    #[test]
    fn description_does_not_depend_on_declaration_order() {
        let forward = machine(syn::parse_quote! {
            struct CbmDeclaration {
                #[on = r#"Bb:"Done",Aa:"Done""#]
                Start: (),
                Done: (),
            }
        });
        let backward = machine(syn::parse_quote! {
            struct CbmDeclaration {
                Done: (),
                #[on = r#"Aa:"Done",Bb:"Done""#]
                Start: (),
            }
        });
        assert_eq!(describe(&forward), describe(&backward));
        assert_eq!(describe(&forward), describe(&forward));
    }
}
