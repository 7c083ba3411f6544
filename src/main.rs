/*
nanotube, a design tool for DNA nanotube lattices.
    Copyright (C) 2023  The nanotube developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use nanotube_design::persistence::PersistedState;
use nanotube_design::*;
use std::env;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!(
            "Usage: {} lattice.json [output.json]",
            args.first().map(String::as_str).unwrap_or("nanotube")
        );
        process::exit(0);
    }
    let output = args.get(2).map(Path::new);
    if let Err(e) = build_lattice(Path::new(&args[1]), output) {
        eprintln!("Could not build {}: {}", args[1], e);
        process::exit(1);
    }
}

fn build_lattice(path: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    let parameters: DomainsParameters = serde_json::from_str(&json)?;
    let domains = Domains::from_parameters(&parameters)?;
    log::info!("{}", domains.profile().formated_string());

    let mut double_helices = DoubleHelices::new(domains);
    double_helices.compute()?;
    let strands = double_helices.strands();
    let junctables = strands.points().filter(|(_, p)| p.is_junctable()).count();
    println!(
        "{} domains, closed: {}, {} strands, {} junctable NEMids",
        double_helices.len(),
        double_helices.domains().closed(),
        strands.len(),
        junctables
    );

    if let Some(output) = output {
        let state = PersistedState::capture(&double_helices, &strands);
        std::fs::write(output, state.to_json()?)?;
        log::info!("Saved lattice to {}", output.display());
    }
    Ok(())
}
