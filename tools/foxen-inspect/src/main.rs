// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

mod args;

use crate::args::Args;
use clap::Parser;
use foxen_common::Dbref;
use foxen_common::model::{DbObject, ObjFlag, ObjType, ObjectVariant};
use foxen_textdump::{Textdump, textdump_load};
use strum::IntoEnumIterator;
use tracing::info;

const OBJ_TYPES: [ObjType; 5] = [
    ObjType::Room,
    ObjType::Thing,
    ObjType::Exit,
    ObjType::Player,
    ObjType::Program,
];

fn print_summary(textdump: &Textdump, with_configs: bool) {
    println!("signature: {}", textdump.version_string);
    println!("top id:    {}", textdump.top_id);
    println!("parms:     {}", textdump.parms_info);
    println!("configs:   {}", textdump.configs.len());
    if with_configs {
        for (key, value) in &textdump.configs {
            println!("  {key}={value}");
        }
    }
    println!("objects:   {}", textdump.objects.len());
    for obj_type in OBJ_TYPES {
        println!("  {:<8} {}", obj_type, textdump.count_of(obj_type));
    }
}

/// Type name, its unparse letter if it has one, then every set flag bit.
fn flag_names(o: &DbObject) -> String {
    let obj_type = o.obj_type();
    let mut names = vec![match obj_type.type_code() {
        Some(code) => format!("{obj_type}[{code}]"),
        None => obj_type.to_string(),
    }];
    let flags = o.obj_flags();
    names.extend(
        ObjFlag::iter()
            .filter(|f| flags.contains(*f))
            .map(|f| f.to_string()),
    );
    names.join(" ")
}

fn print_object(textdump: &Textdump, o: &DbObject) {
    let c = &o.common;
    println!("{} {:?}", c.id, c.name);
    println!("  flags:     {} ({})", c.flags, flag_names(o));
    println!("  owner:     {}", o.owner());
    println!("  location:  {}", c.location);
    println!("  next:      {}", c.next);
    println!(
        "  times:     created {} used {} modified {} (uses: {})",
        c.created, c.last_used, c.modified, c.use_count
    );
    match &o.variant {
        ObjectVariant::Room { dropto, .. } => println!("  dropto:    {dropto}"),
        ObjectVariant::Thing { home, .. } | ObjectVariant::Player { home, .. } => {
            println!("  home:      {home}")
        }
        ObjectVariant::Exit { destinations, .. } => {
            let dests: Vec<String> = destinations.iter().map(Dbref::to_string).collect();
            println!("  dests:     [{}]", dests.join(", "));
        }
        ObjectVariant::Program { .. } => {}
    }
    if o.contents_head().is_some() {
        let contents: Vec<String> = textdump
            .contents_of(c.id)
            .map(|o| format!("{} {:?}", o.id(), o.name()))
            .collect();
        println!("  contents:  [{}]", contents.join(", "));
    }
    if o.exits_head().is_some() {
        let exits: Vec<String> = textdump
            .exits_of(c.id)
            .map(|o| format!("{} {:?}", o.id(), o.name()))
            .collect();
        println!("  exits:     [{}]", exits.join(", "));
    }
    println!("  props:     {}", c.props.len());
    for (line, decoded) in c.props.iter().zip(o.decoded_props()) {
        println!("    {line}");
        match decoded {
            Ok(prop) if prop.is_blessed() => println!("      -> {:?} (blessed)", prop.value),
            Ok(prop) => println!("      -> {:?}", prop.value),
            Err(e) => println!("      !! {e}"),
        }
    }
}

fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    let args = Args::parse();

    foxen_common::tracing::init_tracing(args.debug).unwrap_or_else(|e| {
        eprintln!("Unable to configure logging: {e}");
        std::process::exit(1);
    });

    let options = args.load_options()?;
    info!(
        "Importing {:?} ({:?}, {:?})",
        args.path, options.encoding, options.unknown_variants
    );
    let textdump = textdump_load(&args.path, options)?;

    match args.show {
        Some(objid) => {
            let Some(o) = textdump.objects.get(&objid) else {
                return Err(eyre::eyre!("object {objid} not present in dump"));
            };
            print_object(&textdump, o);
        }
        None => print_summary(&textdump, args.configs),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::flag_names;
    use foxen_common::model::{CommonFields, DbObject, ObjectVariant};
    use foxen_common::{Dbref, GOD, NOTHING};

    fn object(flags: i32, variant: ObjectVariant) -> DbObject {
        DbObject {
            common: CommonFields {
                id: Dbref::mk_id(1),
                name: "One".to_string(),
                location: Dbref::mk_id(0),
                contents: NOTHING,
                next: NOTHING,
                flags,
                created: 0,
                last_used: 0,
                use_count: 0,
                modified: 0,
                props: vec![],
                garbage: false,
            },
            variant,
        }
    }

    #[test]
    fn player_flags_carry_type_letter() {
        let player = object(
            0x10 | 3,
            ObjectVariant::Player {
                home: Dbref::mk_id(0),
                exits: NOTHING,
                password: String::new(),
            },
        );
        assert_eq!(flag_names(&player), "Player[P] Wizard");
    }

    #[test]
    fn things_have_no_type_letter() {
        let thing = object(
            1,
            ObjectVariant::Thing {
                home: Dbref::mk_id(0),
                exits: NOTHING,
                owner: GOD,
            },
        );
        assert_eq!(flag_names(&thing), "Thing");
    }
}
