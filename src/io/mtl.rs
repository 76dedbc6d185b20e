//! Wavefront MTL material library support.
//!
//! Only the fields the converter carries are read: `newmtl`, `Ka`, `Kd`,
//! `Ks` and `Ns`. Everything else, and anything before the first `newmtl`,
//! is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use super::text::{first_token, for_each_keyed_line, parse_floats};
use crate::error::{MeshError, Result};
use crate::mesh::{ObjMaterial, Rgb};

/// Parse MTL text into material records, in file order.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<ObjMaterial>> {
    let mut materials: Vec<ObjMaterial> = Vec::new();

    for_each_keyed_line(reader, |key, rest| {
        if key == "newmtl" {
            materials.push(ObjMaterial::new(first_token(rest).unwrap_or("")));
            return;
        }
        let Some(material) = materials.last_mut() else {
            return;
        };
        match key {
            "Ka" => set_color(&mut material.ambient, rest),
            "Kd" => set_color(&mut material.diffuse, rest),
            "Ks" => set_color(&mut material.specular, rest),
            "Ns" => {
                let mut ns = [material.shininess];
                parse_floats(rest, &mut ns);
                material.shininess = ns[0];
            }
            _ => {}
        }
    })?;

    Ok(materials)
}

fn set_color(color: &mut Rgb, text: &str) {
    let mut rgb = [color.r, color.g, color.b];
    parse_floats(text, &mut rgb);
    *color = Rgb::from(rgb);
}

/// Load materials from an MTL file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<ObjMaterial>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::load(path, e))?;
    parse(BufReader::new(file))
}

/// Write materials as MTL text.
///
/// Numbers use the shortest form that reads back to the same `f32`, so
/// colors survive a write/parse cycle bit for bit.
pub fn write<W: Write>(materials: &[ObjMaterial], mut writer: W) -> Result<()> {
    for m in materials {
        writeln!(writer, "newmtl {}", m.name)?;
        writeln!(writer, "Ka {:?} {:?} {:?}", m.ambient.r, m.ambient.g, m.ambient.b)?;
        writeln!(writer, "Kd {:?} {:?} {:?}", m.diffuse.r, m.diffuse.g, m.diffuse.b)?;
        writeln!(writer, "Ks {:?} {:?} {:?}", m.specular.r, m.specular.g, m.specular.b)?;
        writeln!(writer, "Ns {:?}", m.shininess)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_materials() {
        let text = "\
# library
Kd 9 9 9
newmtl red
Ka 0.1 0.2 0.3
Kd 1 0 0
Ks 0.5 0.5 0.5
Ns 10
illum 2
newmtl blue
Kd 0 0 1
";
        let materials = parse(text.as_bytes()).unwrap();
        assert_eq!(materials.len(), 2);

        let red = &materials[0];
        assert_eq!(red.name, "red");
        assert_eq!(red.ambient, Rgb::new(0.1, 0.2, 0.3));
        assert_eq!(red.diffuse, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(red.specular, Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(red.shininess, 10.0);

        let blue = &materials[1];
        assert_eq!(blue.ambient, Rgb::ZERO);
        assert_eq!(blue.diffuse, Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(blue.shininess, 0.0);
    }

    #[test]
    fn test_partial_color_line() {
        let materials = parse("newmtl m\nKd 0.5\n".as_bytes()).unwrap();
        assert_eq!(materials[0].diffuse, Rgb::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_write_format() {
        let mut m = ObjMaterial::new("material_0");
        m.ambient = Rgb::new(1.0, 1.0, 1.0);
        m.diffuse = Rgb::new(0.5, 0.25, 1.0);

        let mut out = Vec::new();
        write(&[m], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "newmtl material_0\nKa 1.0 1.0 1.0\nKd 0.5 0.25 1.0\nKs 0.0 0.0 0.0\nNs 0.0\n"
        );
    }

    #[test]
    fn test_write_then_parse_keeps_bits() {
        let mut m = ObjMaterial::new("odd");
        m.diffuse = Rgb::new(0.1, 1.0 / 3.0, f32::from_bits(0x3F00_0001));

        let mut out = Vec::new();
        write(std::slice::from_ref(&m), &mut out).unwrap();
        let back = parse(out.as_slice()).unwrap();
        assert!(back[0].diffuse.same_bits(m.diffuse));
    }
}
