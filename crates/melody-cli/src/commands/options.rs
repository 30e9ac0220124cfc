use melody_core::catalog;

/// Print the options offered by the preference form.
pub fn show_options() {
    println!("Genres (--genre, repeatable):");
    for genre in catalog::GENRES {
        println!("  {genre}");
    }

    println!("\nEras (--era, repeatable):");
    for era in catalog::ERAS {
        println!("  {era}");
    }

    println!("\nVibes (--vibe, pick one):");
    for vibe in catalog::VIBES {
        println!("  {vibe}");
    }

    println!("\nExample themes for 'commute-melody recommend':");
    for theme in catalog::EXAMPLE_THEMES {
        println!("  {theme}");
    }
}
