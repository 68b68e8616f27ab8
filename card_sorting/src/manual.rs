/*!

This is the long-form manual for `card_sorting` and `cardsort`.

## Input formats

The following formats are supported:
* `xlsx` Excel workbook, as exported by most survey tools (default)
* `csv` Comma Separated Values, without any header interpretation

### `xlsx`

The first worksheet is used when the workbook only has one. Otherwise the name of
the worksheet must be given with `--excel-worksheet-name` (or `excelWorksheetName`
in the configuration file).

Cells are read at their absolute position, so that column `AL` is always the
38th column of the sheet. Numbers, booleans and dates are converted to text.
Error cells (`#DIV/0!`, `#N/A`...) are read as blank, with a warning.

### `csv`

Each line is a row. Lines may have different lengths: missing cells are blank.

## Rows

The first row is the header of the export. It is not interpreted. The rows
following the header may contain metadata from the survey tool (question texts,
import identifiers): the number of such rows is controlled by `--metadata-rows`
(3 by default). All the remaining rows are participants. A participant is
identified by its position among the rows that follow the header, starting at 1:
with the default settings, the first participant is `4`.

## Groups

Two blocks of columns describe the groups:
* the contents columns (`AL:YB` by default), one cell per group, with the
  elements separated by commas
* the name columns (`YC:YQ` by default), one cell per group

The n-th contents column is read with the n-th name column. When the blocks do
not have the same size, only as many groups as the smaller block are read and a
warning is displayed. When the blocks go past the last column of the sheet, they
are narrowed and a warning is displayed.

A group is kept when it has at least one element or a name. A group without a
name is reported as `unnamed`. The kept groups of a participant are numbered 1,
2, 3... without gaps. Participants without any group are ignored.

### Protected phrases

Some element names contain a comma. They are registered as protected phrases
and are never split. The default phrases are:
* `Degrees, Majors, Minors, and Certificates Declared`
* `Register, Add, or Drop Classes`

Use `--protected-phrase` (repeatable) or `protectedPhrases` to replace them.
Protected phrases are matched as exact substrings: a phrase typed with a
different spacing is split like any other text, and a phrase glued to other text
(without a comma in between) stays whole but inside the larger element.

## Analyses

* **Group names**: every named group counts once, even when a participant uses
  the same name several times.
* **Element frequency**: every occurrence of an element in a group counts once.
* **Pairs**: every pair of distinct elements in a group counts once. An element
  present twice in a group makes two pairs with each other element.
* **Relationships**: for each element, the elements it was grouped with. The
  reports show the 5 most frequent ones.

Rankings are by decreasing count. Ties are listed in the order in which the
entries were first seen. Within a group, pairs are seen in the sorted order of
their elements.

## Configuration

A JSON configuration file can be passed with `--config`:

```text
{
  "outputSettings": {
    "studyName": "Website study",
    "outputDirectory": "out",
    "cardSortFile": "CardSort.txt",
    "groupingsFile": "Groupings.txt",
    "summaryFile": "Summary.txt"
  },
  "sources": [
    {
      "provider": "xlsx",
      "filePath": "responses.xlsx",
      "metadataRows": 3,
      "groupColumns": { "first": "AL", "last": "YB" },
      "nameColumns": { "first": "YC", "last": "YQ" }
    }
  ],
  "protectedPhrases": ["Register, Add, or Drop Classes"],
  "freeTextQuestions": [
    { "column": "T", "question": "What are the top things you typically use the website for?" }
  ]
}
```

Columns are given as letters or as 1-based numbers. Paths are relative to the
directory of the configuration file. Command line flags take precedence.

Without `freeTextQuestions`, the answers in columns `T`, `W` and `Z` of the
survey export are summarized. An empty list turns the summary off.

*/
