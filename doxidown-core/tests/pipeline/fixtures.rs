//! Shared in-source XML fixtures and session/link-table helpers.

use doxidown_core::parse::{compound, index};
use doxidown_core::render::{CompoundSummary, MapLookup, MapResolver};
use doxidown_core::ParseSession;

pub const INDEX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doxygenindex version="1.9.8" xml:lang="en-US">
  <compound refid="namespacegeo" kind="namespace"><name>geo</name>
    <member refid="namespacegeo_1af1" kind=""><name>distance</name></member>
  </compound>
  <compound refid="classgeo_1_1Circle" kind="class"><name>geo::Circle</name>
    <member refid="classgeo_1_1Circle_1a01" kind=""><name>Circle</name></member>
    <member refid="classgeo_1_1Circle_1a02" kind=""><name>area</name></member>
    <member refid="classgeo_1_1Circle_1a03" kind=""><name>operator==</name></member>
    <member refid="classgeo_1_1Circle_1a04" kind=""><name>Style</name></member>
  </compound>
</doxygenindex>"#;

pub const NAMESPACE_XML: &str = r#"<doxygen version="1.9.8">
  <compounddef id="namespacegeo" kind="namespace" language="C++">
    <compoundname>geo</compoundname>
    <innerclass refid="classgeo_1_1Circle" prot="public">geo::Circle</innerclass>
    <briefdescription><para>Planar geometry primitives.</para></briefdescription>
    <sectiondef kind="func">
      <memberdef kind="function" id="namespacegeo_1af1" prot="public" static="no">
        <type>double</type>
        <definition>double geo::distance</definition>
        <argsstring>(const Circle &amp;a, const Circle &amp;b)</argsstring>
        <name>distance</name>
        <briefdescription><para>Center distance between two circles.</para></briefdescription>
        <detaileddescription>
          <para>
            <parameterlist kind="param">
              <parameteritem>
                <parameternamelist><parametername>a</parametername></parameternamelist>
                <parameterdescription><para>first circle</para></parameterdescription>
              </parameteritem>
              <parameteritem>
                <parameternamelist><parametername>b</parametername></parameternamelist>
                <parameterdescription><para>second circle</para></parameterdescription>
              </parameteritem>
            </parameterlist>
            <simplesect kind="return"><para>Euclidean distance.</para></simplesect>
          </para>
        </detaileddescription>
        <location file="geo/geo.hpp" line="7"/>
      </memberdef>
    </sectiondef>
    <location file="geo/geo.hpp" line="1"/>
  </compounddef>
</doxygen>"#;

pub const CIRCLE_XML: &str = r#"<doxygen version="1.9.8">
  <compounddef id="classgeo_1_1Circle" kind="class" language="C++" prot="public">
    <compoundname>geo::Circle</compoundname>
    <briefdescription><para>A circle with center and radius.</para></briefdescription>
    <detaileddescription>
      <para>Radius must stay <bold>positive</bold>; see <ref refid="namespacegeo_1af1" kindref="member">distance</ref> for metrics.</para>
      <para><simplesect kind="note"><para>Instances are immutable.</para></simplesect></para>
      <para>
        <itemizedlist>
          <listitem><para>unit circle has radius 1</para></listitem>
          <listitem><para>degenerate circles are rejected</para></listitem>
        </itemizedlist>
      </para>
      <para>
        <programlisting filename="demo.cpp">
          <codeline lineno="1"><highlight class="normal">Circle<sp/>c(1.0);</highlight></codeline>
        </programlisting>
      </para>
    </detaileddescription>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="classgeo_1_1Circle_1a01" prot="public" static="no" explicit="yes">
        <definition>geo::Circle::Circle</definition>
        <argsstring>(double radius)</argsstring>
        <name>Circle</name>
        <location file="geo/circle.hpp" line="12"/>
      </memberdef>
      <memberdef kind="function" id="classgeo_1_1Circle_1a02" prot="public" static="no" const="yes">
        <type>double</type>
        <definition>double geo::Circle::area</definition>
        <argsstring>() const</argsstring>
        <name>area</name>
        <briefdescription><para>Enclosed area.</para></briefdescription>
        <location file="geo/circle.hpp" line="18"/>
      </memberdef>
      <memberdef kind="function" id="classgeo_1_1Circle_1a03" prot="public" static="no" const="yes">
        <type>bool</type>
        <definition>bool geo::Circle::operator==</definition>
        <argsstring>(const Circle &amp;other) const</argsstring>
        <name>operator==</name>
        <location file="geo/circle.hpp" line="22"/>
      </memberdef>
    </sectiondef>
    <sectiondef kind="public-type">
      <memberdef kind="enum" id="classgeo_1_1Circle_1a04" prot="public" static="no">
        <type></type>
        <name>Style</name>
        <enumvalue id="classgeo_1_1Circle_1a04a1" prot="public">
          <name>Solid</name>
          <briefdescription><para>filled outline</para></briefdescription>
        </enumvalue>
        <enumvalue id="classgeo_1_1Circle_1a04a2" prot="public">
          <name>Dashed</name>
          <initializer>= 2</initializer>
        </enumvalue>
        <location file="geo/circle.hpp" line="8"/>
      </memberdef>
    </sectiondef>
    <location file="geo/circle.hpp" line="6"/>
  </compounddef>
</doxygen>"#;

/// Parse the whole fixture corpus in index order and run the global passes.
pub fn parsed_corpus() -> ParseSession {
    let mut sess = ParseSession::new();
    index::parse_index(INDEX_XML, &mut sess).expect("index parses");
    compound::parse_compound_file(NAMESPACE_XML, &mut sess).expect("namespace parses");
    compound::parse_compound_file(CIRCLE_XML, &mut sess).expect("class parses");
    index::backfill_member_kinds(&mut sess).expect("back-fill runs once");
    index::link_hierarchy(&mut sess);
    sess
}

/// Link tables mirroring what the CLI builds: a page per compound, members
/// anchored on their compound's page.
pub fn link_tables(sess: &ParseSession) -> (MapResolver, MapLookup) {
    let mut resolver = MapResolver::new();
    let mut lookup = MapLookup::new();
    for compound in sess.compounds() {
        resolver.insert(&compound.id, format!("/api/{}", compound.id));
        lookup.insert(CompoundSummary {
            refid: compound.id.clone(),
            kind: compound.kind.as_str().to_string(),
            name: compound.name.clone(),
            brief: None,
        });
        for section in &compound.sections {
            for member in &section.members {
                resolver.insert(&member.id, format!("/api/{}#{}", compound.id, member.id));
            }
        }
    }
    (resolver, lookup)
}
