use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("gapminder.csv");

    // Copy gapminder.csv to OUT_DIR for include_str. The header is checked here
    // so a malformed drop-in file fails the build rather than the page load.
    let src = Path::new("../fixtures/gapminder.csv");
    if src.exists() {
        let mut rdr = csv::Reader::from_path(src).expect("Failed to open gapminder.csv");
        let headers = rdr.headers().expect("gapminder.csv has no header").clone();
        for column in ["country", "continent", "year", "lifeExp", "pop", "gdpPercap", "iso_alpha", "iso_num"] {
            if !headers.iter().any(|h| h.trim() == column) {
                panic!("gapminder.csv is missing column `{}`", column);
            }
        }
        fs::copy(src, &dest).unwrap();
    } else {
        println!("cargo:warning=fixtures/gapminder.csv not found, embedding a one-row placeholder");
        fs::write(
            &dest,
            "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\nAfghanistan,Asia,2007,43.828,31889923,974.5803384,AFG,4\n",
        )
        .unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/gapminder.csv");
}
